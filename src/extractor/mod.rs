//! Block extraction from converted HTML.
//!
//! The extractor consumes the HTML string produced by an external
//! document-to-HTML converter and flattens it into an ordered sequence of
//! [`TextBlock`]s, one per block-level element. Blocks carry both a
//! whitespace-normalized `text` (what search and instruction grounding work
//! on) and the element's inner `html` (what a renderer needs to preserve
//! inline emphasis).
//!
//! Extraction never fails: malformed markup ends the scan early with a
//! warning, and whatever blocks were collected up to that point are kept.
//!
//! ## Example
//!
//! ```
//! use docsplice::extractor::extract_blocks;
//!
//! let result = extract_blocks("<h1>Title</h1><p>Body text</p>");
//! assert_eq!(result.blocks.len(), 2);
//! assert_eq!(result.blocks[0].text, "Title");
//! assert_eq!(result.blocks[1].index, 1);
//! ```

mod scan;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic type of an extracted block, derived from its source tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    /// Regular paragraph (`<p>` or any unclassified block tag)
    Paragraph,
    /// `<h1>`
    Heading1,
    /// `<h2>`
    Heading2,
    /// `<h3>`
    Heading3,
    /// `<h4>`
    Heading4,
    /// `<h5>`
    Heading5,
    /// `<h6>`
    Heading6,
    /// `<li>`
    ListItem,
    /// `<td>` or `<th>`
    TableCell,
    /// `<blockquote>`
    Blockquote,
}

impl BlockType {
    /// Classify a lowercase tag name. Returns `None` for non-block tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(Self::Paragraph),
            "h1" => Some(Self::Heading1),
            "h2" => Some(Self::Heading2),
            "h3" => Some(Self::Heading3),
            "h4" => Some(Self::Heading4),
            "h5" => Some(Self::Heading5),
            "h6" => Some(Self::Heading6),
            "li" => Some(Self::ListItem),
            "td" | "th" => Some(Self::TableCell),
            "blockquote" => Some(Self::Blockquote),
            _ => None,
        }
    }

    /// The wire name of this block type (e.g. `"list-item"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Heading4 => "heading4",
            Self::Heading5 => "heading5",
            Self::Heading6 => "heading6",
            Self::ListItem => "list-item",
            Self::TableCell => "table-cell",
            Self::Blockquote => "blockquote",
        }
    }
}

/// One extracted semantic text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Dense 0-based index, assigned only to kept (non-empty) blocks
    pub index: usize,

    /// Semantic block type
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Normalized text: trimmed, internal whitespace collapsed
    pub text: String,

    /// The element's inner markup, inline formatting preserved
    pub html: String,

    /// Source tag name (e.g. `"td"`; distinguishes `td` from `th`)
    pub tag: String,
}

/// Counts derived from an extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Number of kept blocks
    pub total_blocks: usize,

    /// Kept blocks per block type, in first-seen order
    pub blocks_by_type: IndexMap<String, usize>,
}

/// Output of one extraction pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Kept blocks with dense indices, in document order
    pub blocks: Vec<TextBlock>,

    /// The input HTML, passed through untouched
    pub raw_html: String,

    /// Non-fatal problems encountered during the scan
    pub warnings: Vec<String>,

    /// Derived counts
    pub summary: ExtractionSummary,
}

/// Extract ordered text blocks from an HTML document string.
///
/// Scans block-level tags (paragraphs, headings 1-6, list items, table
/// cells, blockquotes) in document order. Blocks whose normalized text is
/// empty are dropped; the survivors get contiguous 0-based indices. For
/// list items, text inside nested `<ul>`/`<ol>` subtrees is excluded so
/// sub-item text is not duplicated into the parent item.
pub fn extract_blocks(html: &str) -> ExtractionResult {
    let (blocks, warnings) = scan::scan_html(html);

    let mut summary = ExtractionSummary {
        total_blocks: blocks.len(),
        ..Default::default()
    };
    for block in &blocks {
        *summary
            .blocks_by_type
            .entry(block.block_type.name().to_string())
            .or_insert(0) += 1;
    }

    log::debug!(
        "extracted {} blocks ({} warnings)",
        blocks.len(),
        warnings.len()
    );

    ExtractionResult {
        blocks,
        raw_html: html.to_string(),
        warnings,
        summary,
    }
}
