//! Field injection engine.
//!
//! Splices interactive form fields into a document IR at positions named by
//! externally supplied [`FieldDescriptor`]s. The engine never mutates its
//! input: it deep-copies the page or document on entry and returns the new
//! structure together with a diagnostic for every descriptor that was
//! skipped or placed via a fallback path.
//!
//! Descriptors are processed strictly in input order because a later
//! descriptor may chain onto a field minted by an earlier one in the same
//! batch (see [`InjectionPoint::target_element_id`]); the name-to-id
//! registry backing that chaining is created at batch entry and discarded
//! at batch exit.
//!
//! ## Example
//!
//! ```
//! use docsplice::inject::{inject_into_page, FieldDescriptor, InjectionMethod};
//! use docsplice::ir::{Element, FieldType, Page};
//!
//! let page = Page::with_elements(1, vec![Element::paragraph("Full Name:")]);
//! let descriptor = FieldDescriptor::new("name", FieldType::TextField, 0, InjectionMethod::InsertAfter)
//!     .with_anchor_text("Name:");
//!
//! let report = inject_into_page(&page, &[descriptor]);
//! assert_eq!(report.injected, 1);
//! assert!(report.diagnostics.is_empty());
//! ```

mod descriptor;
mod engine;

pub use descriptor::{FieldDescriptor, InjectionMethod, InjectionPoint, Position};
pub use engine::{
    inject_into_document, inject_into_page, Diagnostic, DiagnosticKind, InjectionReport,
};
