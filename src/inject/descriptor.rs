//! Externally supplied injection instructions.
//!
//! Descriptors arrive as JSON from a detection collaborator (vision model,
//! rule engine, operator UI); serde names follow that wire format.

use crate::ir::FieldType;
use serde::{Deserialize, Serialize};

/// How a field is spliced relative to the targeted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InjectionMethod {
    /// Remove the target text (or all of it) and put the field there
    Replace,
    /// Keep the text, place the field after the anchor/target
    InsertAfter,
    /// Keep the text, place the field before the anchor/target
    InsertBefore,
}

/// Addressed location inside a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-based index into the page's element list.
    ///
    /// Optional on the wire; a descriptor without it is skipped with a
    /// diagnostic rather than failing the batch.
    #[serde(rename = "elementIndex", skip_serializing_if = "Option::is_none")]
    pub element_index: Option<usize>,

    /// 0-based row index (table targets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// 0-based column index (table targets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
}

/// Where and how one field is injected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionPoint {
    /// The addressed element (and cell, for tables)
    pub position: Position,

    /// Splice method
    pub method: InjectionMethod,

    /// Literal text to remove (`Replace` only); blank means "clear all"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Literal text fragment locating the splice boundary for the insert
    /// methods
    #[serde(rename = "anchorText", skip_serializing_if = "Option::is_none")]
    pub anchor_text: Option<String>,

    /// Field name of an earlier descriptor in the same batch to splice
    /// relative to (chaining)
    #[serde(rename = "targetElementId", skip_serializing_if = "Option::is_none")]
    pub target_element_id: Option<String>,
}

/// One externally supplied field to inject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Human-readable field name; also the chaining key for later
    /// descriptors in the batch
    #[serde(rename = "fieldName")]
    pub field_name: String,

    /// Control type of the field to create
    #[serde(rename = "fieldType")]
    pub field_type: FieldType,

    /// Choice options for radio/select fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Where and how to splice
    #[serde(rename = "injectionPoint")]
    pub injection_point: InjectionPoint,
}

impl FieldDescriptor {
    /// Create a descriptor addressing an element by index.
    pub fn new(
        field_name: impl Into<String>,
        field_type: FieldType,
        element_index: usize,
        method: InjectionMethod,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_type,
            options: None,
            injection_point: InjectionPoint {
                position: Position {
                    element_index: Some(element_index),
                    row: None,
                    col: None,
                },
                method,
                target: None,
                anchor_text: None,
                target_element_id: None,
            },
        }
    }

    /// Address a table cell.
    pub fn at_cell(mut self, row: usize, col: usize) -> Self {
        self.injection_point.position.row = Some(row);
        self.injection_point.position.col = Some(col);
        self
    }

    /// Set the literal text to remove (`Replace`).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.injection_point.target = Some(target.into());
        self
    }

    /// Set the anchor text locating the splice boundary.
    pub fn with_anchor_text(mut self, anchor: impl Into<String>) -> Self {
        self.injection_point.anchor_text = Some(anchor.into());
        self
    }

    /// Chain onto the field minted for an earlier descriptor.
    pub fn with_chain_target(mut self, field_name: impl Into<String>) -> Self {
        self.injection_point.target_element_id = Some(field_name.into());
        self
    }

    /// Attach choice options.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }
}
