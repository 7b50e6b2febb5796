//! Document, page, and paragraph-level IR types.

use super::field::Field;
use super::table::Row;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A structured document: an ordered sequence of pages.
///
/// Documents are produced by extraction or loaded from a prior JSON
/// snapshot, mutated only by the injection engine (which always clones
/// first), and retired when superseded by a newer snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document title
    pub title: String,

    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document with a title and no pages.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    /// Look up a page by its 1-based page number.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// Look up a mutable page by its 1-based page number.
    pub fn page_mut(&mut self, page_number: u32) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.page_number == page_number)
    }

    /// Parse a document from its JSON interchange form.
    ///
    /// Malformed shapes (a page without an element list, a cell that is
    /// neither text nor a field object) surface here as
    /// [`Error::MalformedStructure`]; once a `Document` exists its shape is
    /// guaranteed by the type system.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::MalformedStructure(format!("invalid document JSON: {}", e)))
    }

    /// Serialize the document to its JSON interchange form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number, unique within the document
    #[serde(rename = "pageNumber")]
    pub page_number: u32,

    /// Block-level elements in reading order
    pub elements: Vec<Element>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            elements: Vec::new(),
        }
    }

    /// Create a page with elements.
    pub fn with_elements(page_number: u32, elements: Vec<Element>) -> Self {
        Self {
            page_number,
            elements,
        }
    }
}

/// A block-level element: a paragraph or a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A paragraph of text, possibly with spliced-in fields
    Paragraph {
        /// The paragraph's content
        body: ParagraphBody,
    },
    /// A table of rows and cells
    Table {
        /// Rows in top-to-bottom order
        rows: Vec<Row>,
    },
}

impl Element {
    /// Create a plain text paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            body: ParagraphBody::PlainText(text.into()),
        }
    }

    /// Create a table from rows.
    pub fn table(rows: Vec<Row>) -> Self {
        Self::Table { rows }
    }

    /// Get the paragraph body, if this element is a paragraph.
    pub fn as_paragraph(&self) -> Option<&ParagraphBody> {
        match self {
            Self::Paragraph { body } => Some(body),
            _ => None,
        }
    }

    /// Get the table rows, if this element is a table.
    pub fn as_table(&self) -> Option<&[Row]> {
        match self {
            Self::Table { rows } => Some(rows),
            _ => None,
        }
    }
}

/// The content of a paragraph.
///
/// Exactly one representation is active at a time: a paragraph starts as
/// `PlainText` and converts to `Spliced` when a field is inserted into it.
/// The conversion is one-directional within an injection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParagraphBody {
    /// Unbroken text content
    PlainText(String),
    /// Interleaved text runs and field references
    Spliced(Vec<ContentItem>),
}

impl ParagraphBody {
    /// The concatenated text content, ignoring field references.
    pub fn text_content(&self) -> String {
        match self {
            Self::PlainText(s) => s.clone(),
            Self::Spliced(items) => {
                let mut out = String::new();
                for item in items {
                    if let ContentItem::Text(t) = item {
                        if !out.is_empty() {
                            out.push(' ');
                        }
                        out.push_str(t);
                    }
                }
                out
            },
        }
    }

    /// Whether any field has been spliced into this paragraph.
    pub fn is_spliced(&self) -> bool {
        matches!(self, Self::Spliced(_))
    }

    /// Iterate over spliced-in fields, in content order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        let items: &[ContentItem] = match self {
            Self::Spliced(items) => items,
            Self::PlainText(_) => &[],
        };
        items.iter().filter_map(|item| match item {
            ContentItem::FieldRef(f) => Some(f),
            ContentItem::Text(_) => None,
        })
    }
}

/// One item of a spliced paragraph: a text run or a field reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    /// A run of plain text
    Text(String),
    /// A spliced-in field
    FieldRef(Field),
}
