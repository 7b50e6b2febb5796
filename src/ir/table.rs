//! Table rows and cells.

use super::field::Field;
use serde::{Deserialize, Serialize};

/// Placement of a single field relative to its cell text.
///
/// Only recorded when a field must render ahead of the text; the default
/// (absent) placement is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPosition {
    /// Render the field before the cell text
    Before,
    /// Render the field after the cell text
    After,
}

/// One grid position in a table row.
///
/// Cells evolve monotonically as fields are attached: a `PlainText` cell
/// becomes `WithField` on the first attachment and `WithFields` on the
/// second; once plural, the singular form never reappears. `Covered` marks
/// a position subsumed by a rowspan from a cell above and is never a valid
/// injection target.
///
/// On the wire these keep their natural JSON shapes: `null` for covered
/// positions, a bare string for plain cells, and objects keyed by `field`
/// or `fields` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Cell holding exactly one field
    WithField {
        /// Remaining cell text
        text: String,
        /// The attached field
        field: Field,
        /// Set when the field renders before the text
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<FieldPosition>,
    },
    /// Cell holding two or more fields, in attachment order
    WithFields {
        /// Remaining cell text
        text: String,
        /// Attached fields, in the order they were added
        fields: Vec<Field>,
    },
    /// Plain text cell
    PlainText(String),
    /// Position subsumed by a rowspan from above; not addressable
    Covered,
}

impl Cell {
    /// Create a plain text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Self::PlainText(s.into())
    }

    /// Whether this position is covered by a rowspan from above.
    pub fn is_covered(&self) -> bool {
        matches!(self, Self::Covered)
    }

    /// The cell's current text content, if it has any.
    pub fn current_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(s) => Some(s),
            Self::WithField { text, .. } | Self::WithFields { text, .. } => Some(text),
            Self::Covered => None,
        }
    }

    /// Number of fields attached to this cell.
    pub fn field_count(&self) -> usize {
        match self {
            Self::WithField { .. } => 1,
            Self::WithFields { fields, .. } => fields.len(),
            _ => 0,
        }
    }
}

/// A table row: an ordered run of grid positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cells in column order, covered positions included
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row of plain text cells.
    pub fn from_texts<S: Into<String>>(texts: Vec<S>) -> Self {
        Self {
            cells: texts.into_iter().map(|t| Cell::PlainText(t.into())).collect(),
        }
    }

    /// Get the cell at a 0-based column index.
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get a mutable cell at a 0-based column index.
    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }
}
