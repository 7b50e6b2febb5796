//! Intermediate representation of a document.
//!
//! The IR is the shared tree every other component reads or writes: the
//! extractor's structural counterpart, the injection engine's mutation
//! target, and the interchange format handed to external renderers and
//! editing surfaces. It serializes to plain JSON (see [`Document::to_json`])
//! with paragraph bodies and cells kept in their natural wire shapes while
//! the Rust side stays fully tagged.
//!
//! ## Shape rules
//!
//! - A [`Paragraph`](Element::Paragraph) body is either one plain string or
//!   an ordered sequence of text runs and field references, never both.
//! - A table [`Row`] is a dense grid row: positions subsumed by a rowspan
//!   from above are held by [`Cell::Covered`] so column indices always line
//!   up with the visual grid.
//! - Cells evolve monotonically as fields are attached:
//!   `PlainText -> WithField -> WithFields`.

mod document;
mod field;
mod table;

pub use document::{ContentItem, Document, Element, Page, ParagraphBody};
pub use field::{Field, FieldType};
pub use table::{Cell, FieldPosition, Row};
