use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Control type backing a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Radio,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Radio => "radio",
        }
    }

    /// Any label other than `radio` maps to the text-like control.
    pub fn from_label(label: &str) -> Self {
        match label {
            "radio" => FieldKind::Radio,
            _ => FieldKind::Text,
        }
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(FieldKind::from_label(&label))
    }
}

/// One schema entry driving a rendered input row.
///
/// The `key` is unique within a schema and immutable once created; label
/// and placeholder are mutable. Placeholders carry no meaning for radio
/// fields and serialize empty there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
}

/// Input state of the independent "add new field" sub-form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDraft {
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
}

impl FieldDraft {
    /// The placeholder entry is hidden while the radio kind is selected.
    pub fn placeholder_enabled(&self) -> bool {
        self.kind != FieldKind::Radio
    }

    pub fn clear(&mut self) {
        *self = FieldDraft::default();
    }
}
