// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # DocSplice
//!
//! Structured document editing toolkit: converts HTML into a
//! JSON-compatible intermediate representation of blocks and elements,
//! locates blocks by fuzzy text hints, and splices interactive form-field
//! placeholders into precise text or table positions without disturbing
//! the surrounding content.
//!
//! ## Core Features
//!
//! - **Block Extraction**: HTML to an indexed list of text blocks with
//!   normalized text, preserved inner HTML, and per-type counts
//! - **Fuzzy Block Search**: prefix, substring, and token-overlap matching
//!   with graded tiers, match previews, and typed failure reasons
//! - **Field Injection**: replace/insertAfter/insertBefore splicing into
//!   paragraphs and rowspan-aware table cells, with cross-field chaining
//!   and documented fallbacks instead of batch failures
//! - **Edit Audit Trail**: per-job session lifecycle recording every edit,
//!   persisted as one JSON document per job id
//!
//! ## Quick Start
//!
//! ```
//! use docsplice::extractor::extract_blocks;
//! use docsplice::search::{search, SearchMode};
//!
//! let result = extract_blocks("<p>Full Name:</p><p>Date of Birth:</p>");
//! assert_eq!(result.blocks.len(), 2);
//!
//! let outcome = search(&result.blocks, "date of birth", SearchMode::Fuzzy);
//! assert_eq!(outcome.index(), Some(1));
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Document intermediate representation
pub mod ir;

// HTML block extraction
pub mod extractor;

// Fuzzy block search
pub mod search;

// Field injection engine
pub mod inject;

// Edit audit trail
pub mod audit;

// Configuration
pub mod config;

// Re-exports
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use ir::{Cell, ContentItem, Document, Element, Field, FieldType, Page, ParagraphBody, Row};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
