//! Descriptor application and batch bookkeeping.

use super::descriptor::{FieldDescriptor, InjectionMethod};
use crate::ir::{
    Cell, ContentItem, Document, Element, Field, FieldPosition, Page, ParagraphBody,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Whether a diagnostic means the field was omitted or placed anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// The descriptor was skipped; no field was placed
    Skipped,
    /// The field was placed, but via a fallback path
    Fallback,
}

/// A non-fatal problem encountered while applying one descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Index of the descriptor in the input batch; `None` for batch-level
    /// problems (e.g. the addressed page does not exist)
    pub descriptor_index: Option<usize>,

    /// The descriptor's field name, when one is involved
    pub field_name: Option<String>,

    /// Omitted vs. placed-via-fallback
    pub kind: DiagnosticKind,

    /// What happened and which fallback (if any) was taken
    pub detail: String,
}

impl Diagnostic {
    fn skipped(index: usize, field_name: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::warn!("descriptor {} ({}) skipped: {}", index, field_name, detail);
        Self {
            descriptor_index: Some(index),
            field_name: Some(field_name.to_string()),
            kind: DiagnosticKind::Skipped,
            detail,
        }
    }

    fn fallback(index: usize, field_name: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::warn!("descriptor {} ({}) fallback: {}", index, field_name, detail);
        Self {
            descriptor_index: Some(index),
            field_name: Some(field_name.to_string()),
            kind: DiagnosticKind::Fallback,
            detail,
        }
    }

    fn batch(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::warn!("injection batch: {}", detail);
        Self {
            descriptor_index: None,
            field_name: None,
            kind: DiagnosticKind::Skipped,
            detail,
        }
    }
}

/// Result of one injection batch: the new structure plus what happened.
#[derive(Debug, Clone)]
pub struct InjectionReport<T> {
    /// The new structure; the input is never modified
    pub structure: T,

    /// Number of fields actually placed (including fallback placements)
    pub injected: usize,

    /// One entry per skipped or fallback-placed descriptor
    pub diagnostics: Vec<Diagnostic>,
}

/// Field-name to generated-id registry, scoped to one batch.
///
/// Created at batch entry, discarded at batch exit; never shared across
/// calls, which is what keeps concurrent batches independent.
struct BatchRegistry {
    ids: IndexMap<String, String>,
}

impl BatchRegistry {
    fn new() -> Self {
        Self {
            ids: IndexMap::new(),
        }
    }

    fn register(&mut self, field_name: &str, generated_id: &str) {
        self.ids
            .insert(field_name.to_string(), generated_id.to_string());
    }

    fn resolve(&self, field_name: &str) -> Option<&str> {
        self.ids.get(field_name).map(String::as_str)
    }
}

/// Inject a batch of descriptors into a page.
///
/// The page is deep-copied first; descriptors are processed strictly in
/// input order so chaining onto earlier fields works. Every
/// descriptor-level problem degrades to a documented fallback plus a
/// diagnostic; the batch always completes.
pub fn inject_into_page(page: &Page, descriptors: &[FieldDescriptor]) -> InjectionReport<Page> {
    let mut out = page.clone();
    let (injected, diagnostics) = run_batch(&mut out, descriptors);
    InjectionReport {
        structure: out,
        injected,
        diagnostics,
    }
}

/// Inject a batch of descriptors into one page of a document.
///
/// `page_number` is 1-based. If no such page exists the document is
/// returned unchanged with a batch diagnostic; this never fails.
pub fn inject_into_document(
    document: &Document,
    page_number: u32,
    descriptors: &[FieldDescriptor],
) -> InjectionReport<Document> {
    let mut out = document.clone();
    let (injected, diagnostics) = match out.page_mut(page_number) {
        Some(page) => run_batch(page, descriptors),
        None => (
            0,
            vec![Diagnostic::batch(format!(
                "page {} not found; document returned unchanged",
                page_number
            ))],
        ),
    };
    InjectionReport {
        structure: out,
        injected,
        diagnostics,
    }
}

fn run_batch(page: &mut Page, descriptors: &[FieldDescriptor]) -> (usize, Vec<Diagnostic>) {
    let mut registry = BatchRegistry::new();
    let mut diagnostics = Vec::new();
    let mut injected = 0usize;

    for (index, descriptor) in descriptors.iter().enumerate() {
        if apply_descriptor(page, index, descriptor, &mut registry, &mut diagnostics) {
            injected += 1;
        }
    }

    log::debug!(
        "injection batch placed {}/{} fields ({} diagnostics)",
        injected,
        descriptors.len(),
        diagnostics.len()
    );
    (injected, diagnostics)
}

/// Apply one descriptor. Returns true if a field was placed.
fn apply_descriptor(
    page: &mut Page,
    index: usize,
    descriptor: &FieldDescriptor,
    registry: &mut BatchRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let point = &descriptor.injection_point;
    let name = &descriptor.field_name;

    let element_index = match point.position.element_index {
        Some(i) => i,
        None => {
            diagnostics.push(Diagnostic::skipped(
                index,
                name,
                "injection point has no elementIndex",
            ));
            return false;
        },
    };

    let element = match page.elements.get_mut(element_index) {
        Some(e) => e,
        None => {
            diagnostics.push(Diagnostic::skipped(
                index,
                name,
                format!("element {} not found on page", element_index),
            ));
            return false;
        },
    };

    let mut field = Field::new(descriptor.field_type.clone(), name.clone());
    if let Some(options) = &descriptor.options {
        field = field.with_options(options.clone());
    }
    let generated_id = field.id.clone();

    let placed = match element {
        Element::Table { rows } => {
            inject_into_table(rows, index, descriptor, field, diagnostics)
        },
        Element::Paragraph { body } => {
            inject_into_paragraph(body, index, descriptor, field, registry, diagnostics);
            true
        },
    };

    if placed {
        registry.register(name, &generated_id);
        log::debug!(
            "descriptor {} placed field {} in element {}",
            index,
            generated_id,
            element_index
        );
    }
    placed
}

/// Table-cell injection: requires row and col, refuses covered positions.
fn inject_into_table(
    rows: &mut [crate::ir::Row],
    index: usize,
    descriptor: &FieldDescriptor,
    field: Field,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let point = &descriptor.injection_point;
    let name = &descriptor.field_name;

    let (row_idx, col_idx) = match (point.position.row, point.position.col) {
        (Some(r), Some(c)) => (r, c),
        _ => {
            diagnostics.push(Diagnostic::skipped(
                index,
                name,
                "table target requires both row and col",
            ));
            return false;
        },
    };

    let row = match rows.get_mut(row_idx) {
        Some(r) => r,
        None => {
            diagnostics.push(Diagnostic::skipped(
                index,
                name,
                format!("row {} out of range", row_idx),
            ));
            return false;
        },
    };

    let cell = match row.cell_mut(col_idx) {
        Some(c) => c,
        None => {
            diagnostics.push(Diagnostic::skipped(
                index,
                name,
                format!("column {} out of range in row {}", col_idx, row_idx),
            ));
            return false;
        },
    };

    if cell.is_covered() {
        diagnostics.push(Diagnostic::skipped(
            index,
            name,
            format!(
                "cell ({}, {}) is covered by a rowspan and not addressable",
                row_idx, col_idx
            ),
        ));
        return false;
    }

    match point.method {
        InjectionMethod::Replace => {
            let current = cell.current_text().unwrap_or("").to_string();
            let new_text = match point.target.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(target) => match current.find(target) {
                    Some(pos) => {
                        let mut text = String::with_capacity(current.len() - target.len());
                        text.push_str(&current[..pos]);
                        text.push_str(&current[pos + target.len()..]);
                        text.trim().to_string()
                    },
                    None => {
                        diagnostics.push(Diagnostic::fallback(
                            index,
                            name,
                            format!(
                                "target {:?} not found in cell ({}, {}); text kept",
                                target, row_idx, col_idx
                            ),
                        ));
                        current.trim().to_string()
                    },
                },
                None => String::new(),
            };
            *cell = Cell::WithField {
                text: new_text,
                field,
                position: None,
            };
        },
        InjectionMethod::InsertAfter => attach_field(cell, field, None),
        InjectionMethod::InsertBefore => attach_field(cell, field, Some(FieldPosition::Before)),
    }
    true
}

/// Attach a field to a cell, preserving the text and any prior fields.
///
/// Drives the monotonic conversion `PlainText -> WithField -> WithFields`;
/// the conversion to plural drops the single-field position marker, which
/// only exists on `WithField`.
fn attach_field(cell: &mut Cell, field: Field, position: Option<FieldPosition>) {
    let replacement = match std::mem::replace(cell, Cell::Covered) {
        Cell::PlainText(text) => Cell::WithField {
            text,
            field,
            position,
        },
        Cell::WithField {
            text,
            field: prior,
            position: _,
        } => Cell::WithFields {
            text,
            fields: vec![prior, field],
        },
        Cell::WithFields { text, mut fields } => {
            fields.push(field);
            Cell::WithFields { text, fields }
        },
        // Checked by the caller
        Cell::Covered => Cell::Covered,
    };
    *cell = replacement;
}

/// Paragraph injection: anchor splitting, chaining, append/prepend
/// fallbacks. Always places the field.
fn inject_into_paragraph(
    body: &mut ParagraphBody,
    index: usize,
    descriptor: &FieldDescriptor,
    field: Field,
    registry: &BatchRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let point = &descriptor.injection_point;
    let name = &descriptor.field_name;

    let mut items: Vec<ContentItem> = match body {
        ParagraphBody::PlainText(text) => {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![ContentItem::Text(text.clone())]
            }
        },
        ParagraphBody::Spliced(items) => items.clone(),
    };

    match point.method {
        InjectionMethod::Replace => {
            match point.target.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(target) => {
                    if let Some((item_idx, offset)) = find_in_text_items(&items, target) {
                        split_text_item(&mut items, item_idx, offset, offset + target.len(), field);
                    } else {
                        diagnostics.push(Diagnostic::fallback(
                            index,
                            name,
                            format!("replace target {:?} not found; field appended", target),
                        ));
                        items.push(ContentItem::FieldRef(field));
                    }
                },
                // Blank target: the field replaces the whole paragraph.
                None => items = vec![ContentItem::FieldRef(field)],
            }
        },
        InjectionMethod::InsertAfter | InjectionMethod::InsertBefore => {
            let before = point.method == InjectionMethod::InsertBefore;
            place_relative(&mut items, index, descriptor, field, before, registry, diagnostics);
        },
    }

    *body = ParagraphBody::Spliced(items);
}

/// Insert-method placement: anchor boundary first, then chaining, then
/// append/prepend.
fn place_relative(
    items: &mut Vec<ContentItem>,
    index: usize,
    descriptor: &FieldDescriptor,
    field: Field,
    before: bool,
    registry: &BatchRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let point = &descriptor.injection_point;
    let name = &descriptor.field_name;

    let anchor = point.anchor_text.as_deref().filter(|a| !a.is_empty());
    if let Some(anchor) = anchor {
        if let Some((item_idx, offset)) = find_in_text_items(items, anchor) {
            // Split at the anchor's start (insertBefore) or end (insertAfter).
            let boundary = if before {
                offset
            } else {
                offset + anchor.len()
            };
            split_text_item(items, item_idx, boundary, boundary, field);
            return;
        }
    }

    if let Some(chain_key) = point.target_element_id.as_deref() {
        if let Some(target_id) = registry.resolve(chain_key) {
            if let Some(pos) = items.iter().position(
                |item| matches!(item, ContentItem::FieldRef(f) if f.id == target_id),
            ) {
                let at = if before { pos } else { pos + 1 };
                items.insert(at, ContentItem::FieldRef(field));
                return;
            }
            diagnostics.push(Diagnostic::fallback(
                index,
                name,
                format!(
                    "chained field {:?} not present in this element; {} instead",
                    chain_key,
                    if before { "prepended" } else { "appended" }
                ),
            ));
        } else {
            diagnostics.push(Diagnostic::fallback(
                index,
                name,
                format!(
                    "chain target {:?} unknown in this batch; {} instead",
                    chain_key,
                    if before { "prepended" } else { "appended" }
                ),
            ));
        }
    } else if let Some(anchor) = anchor {
        diagnostics.push(Diagnostic::fallback(
            index,
            name,
            format!(
                "anchor {:?} not found; {} instead",
                anchor,
                if before { "prepended" } else { "appended" }
            ),
        ));
    }

    if before {
        items.insert(0, ContentItem::FieldRef(field));
    } else {
        items.push(ContentItem::FieldRef(field));
    }
}

/// Find the first `Text` item containing `needle`; returns the item index
/// and the byte offset of the occurrence within it.
fn find_in_text_items(items: &[ContentItem], needle: &str) -> Option<(usize, usize)> {
    items.iter().enumerate().find_map(|(i, item)| match item {
        ContentItem::Text(text) => text.find(needle).map(|offset| (i, offset)),
        ContentItem::FieldRef(_) => None,
    })
}

/// Replace the text item at `item_idx` with `[before?, field, after?]`,
/// where `before` is the text up to `start` and `after` the text from
/// `end`, both trimmed and omitted when empty.
fn split_text_item(
    items: &mut Vec<ContentItem>,
    item_idx: usize,
    start: usize,
    end: usize,
    field: Field,
) {
    let text = match &items[item_idx] {
        ContentItem::Text(t) => t.clone(),
        ContentItem::FieldRef(_) => return,
    };

    let before = text[..start].trim().to_string();
    let after = text[end..].trim().to_string();

    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement.push(ContentItem::Text(before));
    }
    replacement.push(ContentItem::FieldRef(field));
    if !after.is_empty() {
        replacement.push(ContentItem::Text(after));
    }

    items.splice(item_idx..=item_idx, replacement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::descriptor::FieldDescriptor;
    use crate::ir::{FieldType, Row};

    fn paragraph_page(text: &str) -> Page {
        Page::with_elements(1, vec![Element::paragraph(text)])
    }

    fn spliced_items(page: &Page, element: usize) -> &[ContentItem] {
        match page.elements[element].as_paragraph().unwrap() {
            ParagraphBody::Spliced(items) => items,
            other => panic!("expected spliced paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_with_target_splits_text() {
        let page = paragraph_page("Name: _____ (print clearly)");
        let desc = FieldDescriptor::new("name", FieldType::TextField, 0, InjectionMethod::Replace)
            .with_target("_____");
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 1);
        let items = spliced_items(&report.structure, 0);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ContentItem::Text("Name:".to_string()));
        assert!(matches!(items[1], ContentItem::FieldRef(_)));
        assert_eq!(items[2], ContentItem::Text("(print clearly)".to_string()));
    }

    #[test]
    fn test_replace_blank_target_collapses_paragraph() {
        let page = paragraph_page("all of this goes away");
        let desc = FieldDescriptor::new("sig", FieldType::Image, 0, InjectionMethod::Replace);
        let report = inject_into_page(&page, &[desc]);

        let items = spliced_items(&report.structure, 0);
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], ContentItem::FieldRef(_)));
    }

    #[test]
    fn test_replace_missing_target_appends_with_diagnostic() {
        let page = paragraph_page("nothing to remove here");
        let desc = FieldDescriptor::new("f", FieldType::TextField, 0, InjectionMethod::Replace)
            .with_target("absent");
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Fallback);
        let items = spliced_items(&report.structure, 0);
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], ContentItem::FieldRef(_)));
    }

    #[test]
    fn test_insert_after_anchor() {
        let page = paragraph_page("Date of Birth: and more text");
        let desc = FieldDescriptor::new("dob", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .with_anchor_text("Birth:");
        let report = inject_into_page(&page, &[desc]);

        let items = spliced_items(&report.structure, 0);
        assert_eq!(items[0], ContentItem::Text("Date of Birth:".to_string()));
        assert!(matches!(items[1], ContentItem::FieldRef(_)));
        assert_eq!(items[2], ContentItem::Text("and more text".to_string()));
    }

    #[test]
    fn test_insert_before_anchor() {
        let page = paragraph_page("Signature required below");
        let desc =
            FieldDescriptor::new("sig", FieldType::Image, 0, InjectionMethod::InsertBefore)
                .with_anchor_text("required");
        let report = inject_into_page(&page, &[desc]);

        let items = spliced_items(&report.structure, 0);
        assert_eq!(items[0], ContentItem::Text("Signature".to_string()));
        assert!(matches!(items[1], ContentItem::FieldRef(_)));
        assert_eq!(items[2], ContentItem::Text("required below".to_string()));
    }

    #[test]
    fn test_chaining_places_field_adjacent() {
        let page = paragraph_page("Name: please print");
        let a = FieldDescriptor::new("first", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .with_anchor_text("Name:");
        let b = FieldDescriptor::new("last", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .with_chain_target("first");
        let report = inject_into_page(&page, &[a, b]);

        assert_eq!(report.injected, 2);
        assert!(report.diagnostics.is_empty());
        let items = spliced_items(&report.structure, 0);
        // Name: [first] [last] please print
        assert_eq!(items.len(), 4);
        let first_id = match &items[1] {
            ContentItem::FieldRef(f) => {
                assert_eq!(f.name, "first");
                f.id.clone()
            },
            other => panic!("expected field, got {:?}", other),
        };
        match &items[2] {
            ContentItem::FieldRef(f) => {
                assert_eq!(f.name, "last");
                assert_ne!(f.id, first_id);
            },
            other => panic!("expected chained field, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_before_places_ahead_of_target() {
        let page = paragraph_page("Label:");
        let a = FieldDescriptor::new("a", FieldType::Checkbox, 0, InjectionMethod::InsertAfter)
            .with_anchor_text("Label:");
        let b = FieldDescriptor::new("b", FieldType::Checkbox, 0, InjectionMethod::InsertBefore)
            .with_chain_target("a");
        let report = inject_into_page(&page, &[a, b]);

        let items = spliced_items(&report.structure, 0);
        let names: Vec<&str> = items
            .iter()
            .filter_map(|i| match i {
                ContentItem::FieldRef(f) => Some(f.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_chain_target_appends_with_diagnostic() {
        let page = paragraph_page("Some label text");
        let desc = FieldDescriptor::new("x", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .with_chain_target("never-registered");
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Fallback);
        let items = spliced_items(&report.structure, 0);
        assert!(matches!(items.last().unwrap(), ContentItem::FieldRef(_)));
    }

    #[test]
    fn test_missing_element_index_skips() {
        let page = paragraph_page("text");
        let mut desc =
            FieldDescriptor::new("x", FieldType::TextField, 0, InjectionMethod::InsertAfter);
        desc.injection_point.position.element_index = None;
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 0);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Skipped);
    }

    #[test]
    fn test_element_out_of_range_skips() {
        let page = paragraph_page("text");
        let desc = FieldDescriptor::new("x", FieldType::TextField, 9, InjectionMethod::InsertAfter);
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 0);
        assert_eq!(report.diagnostics.len(), 1);
        // Original element untouched
        assert_eq!(report.structure, page);
    }

    #[test]
    fn test_table_replace_clears_text_without_target() {
        let page = Page::with_elements(
            1,
            vec![Element::table(vec![Row::from_texts(vec!["Name", "fill in"])])],
        );
        let desc = FieldDescriptor::new("name", FieldType::TextField, 0, InjectionMethod::Replace)
            .at_cell(0, 1);
        let report = inject_into_page(&page, &[desc]);

        let rows = report.structure.elements[0].as_table().unwrap();
        match rows[0].cell(1).unwrap() {
            Cell::WithField { text, field, position } => {
                assert_eq!(text, "");
                assert_eq!(field.name, "name");
                assert!(position.is_none());
            },
            other => panic!("expected WithField, got {:?}", other),
        }
    }

    #[test]
    fn test_table_insert_before_marks_position() {
        let page = Page::with_elements(
            1,
            vec![Element::table(vec![Row::from_texts(vec!["Agreed"])])],
        );
        let desc = FieldDescriptor::new("agree", FieldType::Checkbox, 0, InjectionMethod::InsertBefore)
            .at_cell(0, 0);
        let report = inject_into_page(&page, &[desc]);

        let rows = report.structure.elements[0].as_table().unwrap();
        match rows[0].cell(0).unwrap() {
            Cell::WithField { text, position, .. } => {
                assert_eq!(text, "Agreed");
                assert_eq!(*position, Some(FieldPosition::Before));
            },
            other => panic!("expected WithField, got {:?}", other),
        }
    }

    #[test]
    fn test_covered_cell_skipped_and_row_unchanged() {
        let row = Row::new(vec![Cell::text("spans down"), Cell::Covered]);
        let page = Page::with_elements(1, vec![Element::table(vec![row.clone()])]);
        let desc = FieldDescriptor::new("x", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .at_cell(0, 1);
        let report = inject_into_page(&page, &[desc]);

        assert_eq!(report.injected, 0);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Skipped);
        assert_eq!(report.structure.elements[0].as_table().unwrap()[0], row);
    }

    #[test]
    fn test_two_inserts_make_with_fields_in_input_order() {
        let page = Page::with_elements(
            1,
            vec![Element::table(vec![Row::from_texts(vec!["Options"])])],
        );
        let a = FieldDescriptor::new("one", FieldType::Checkbox, 0, InjectionMethod::InsertAfter)
            .at_cell(0, 0);
        let b = FieldDescriptor::new("two", FieldType::Checkbox, 0, InjectionMethod::InsertAfter)
            .at_cell(0, 0);
        let report = inject_into_page(&page, &[a, b]);

        let rows = report.structure.elements[0].as_table().unwrap();
        match rows[0].cell(0).unwrap() {
            Cell::WithFields { text, fields } => {
                assert_eq!(text, "Options");
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["one", "two"]);
            },
            other => panic!("expected WithFields, got {:?}", other),
        }
    }

    #[test]
    fn test_input_is_never_mutated() {
        let page = paragraph_page("Name: _____");
        let snapshot = page.clone();
        let desc = FieldDescriptor::new("n", FieldType::TextField, 0, InjectionMethod::Replace)
            .with_target("_____");
        let _ = inject_into_page(&page, &[desc]);
        assert_eq!(page, snapshot);
    }

    #[test]
    fn test_document_wrapper_unknown_page() {
        let mut doc = Document::new("doc");
        doc.pages.push(paragraph_page("text"));
        let desc = FieldDescriptor::new("x", FieldType::TextField, 0, InjectionMethod::InsertAfter);
        let report = inject_into_document(&doc, 7, &[desc]);

        assert_eq!(report.injected, 0);
        assert_eq!(report.structure, doc);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].descriptor_index.is_none());
    }

    #[test]
    fn test_document_wrapper_routes_to_page() {
        let mut doc = Document::new("doc");
        doc.pages.push(paragraph_page("Name:"));
        let desc = FieldDescriptor::new("n", FieldType::TextField, 0, InjectionMethod::InsertAfter)
            .with_anchor_text("Name:");
        let report = inject_into_document(&doc, 1, &[desc]);

        assert_eq!(report.injected, 1);
        assert!(report.structure.page(1).unwrap().elements[0]
            .as_paragraph()
            .unwrap()
            .is_spliced());
    }
}
