//! Interactive form field placeholders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of interactive control a field renders as.
///
/// The set is open-ended: values not recognized here round-trip through
/// [`FieldType::Custom`] so descriptors from newer detectors are never
/// rejected on type alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line text input
    TextField,
    /// Checkbox
    Checkbox,
    /// Radio button group
    Radio,
    /// Multi-line text input
    TextArea,
    /// Dropdown selection
    Select,
    /// Image placeholder (signatures, stamps, photos)
    Image,
    /// Unrecognized control type, preserved verbatim
    Custom(String),
}

impl FieldType {
    /// Parse a field type from its wire name (e.g. `"textfield"`).
    pub fn from_name(s: &str) -> Self {
        match s {
            "textfield" => Self::TextField,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "textarea" => Self::TextArea,
            "select" => Self::Select,
            "image" => Self::Image,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// The wire name for this field type.
    pub fn name(&self) -> &str {
        match self {
            Self::TextField => "textfield",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Image => "image",
            Self::Custom(s) => s,
        }
    }

    /// Whether this type carries an option list (radio/select).
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Select)
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.name().to_string()
    }
}

/// An interactive form field spliced into the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique field id, generated fresh per injection batch
    pub id: String,

    /// Control type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Human-readable field name (label)
    pub name: String,

    /// Choice options for radio/select fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Field {
    /// Create a field with a freshly generated id.
    pub fn new(field_type: FieldType, name: impl Into<String>) -> Self {
        Self {
            id: Self::generate_id(),
            field_type,
            name: name.into(),
            options: None,
        }
    }

    /// Attach choice options.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Generate a fresh field id.
    ///
    /// Ids only need to be unique within one injection batch and across
    /// concurrently active batches, so an 8-hex-digit random suffix is
    /// sufficient (collision probability is negligible at document scale).
    pub fn generate_id() -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("field_{}", &uuid[..8])
    }
}
