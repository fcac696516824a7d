use serde_json::{Map, Value, json};

use crate::{
    editor::{EditState, EditTarget},
    menu::MenuState,
    spec::{FieldDraft, FieldKind, FormSchema},
    values::ValueMap,
};

/// Which control a rendered row presents.
#[derive(Debug, Clone, PartialEq)]
pub enum RowControl {
    /// Inline edit input bound to the live buffer, plus a submit affordance.
    Edit { target: EditTarget, buffer: String },
    /// Radio control; no pre-filled value semantics.
    Radio,
    /// Text-like input, pre-filled from the value map when present.
    Text {
        placeholder: String,
        value: Option<String>,
    },
}

/// One rendered row per schema field. Every row exposes edit and delete
/// affordances and is a draggable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub key: String,
    pub label: String,
    pub control: RowControl,
    pub menu_open: bool,
    pub draggable: bool,
}

/// Add-form state surfaced to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDraft {
    pub label: String,
    /// `None` while the radio kind is selected (the input is hidden).
    pub placeholder: Option<String>,
    pub kind: FieldKind,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    pub rows: Vec<RenderRow>,
    pub editing: bool,
    pub draft: RenderDraft,
}

/// Build the renderer payload from the schema, values, and UI state.
pub fn build_render_payload(
    schema: &FormSchema,
    values: &ValueMap,
    editor: &EditState,
    menu: &MenuState,
    draft: &FieldDraft,
) -> RenderPayload {
    let rows = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let control = if editor.editing_index() == Some(index)
                && let (Some(target), Some(buffer)) = (editor.target(), editor.buffer())
            {
                RowControl::Edit {
                    target,
                    buffer: buffer.to_string(),
                }
            } else {
                match field.kind {
                    FieldKind::Radio => RowControl::Radio,
                    FieldKind::Text => RowControl::Text {
                        placeholder: field.placeholder.clone(),
                        value: values.get(&field.key).map(str::to_string),
                    },
                }
            };
            RenderRow {
                key: field.key.clone(),
                label: field.label.clone(),
                control,
                menu_open: menu.is_open(index),
                draggable: true,
            }
        })
        .collect::<Vec<_>>();

    RenderPayload {
        rows,
        editing: editor.is_editing(),
        draft: RenderDraft {
            label: draft.label.clone(),
            placeholder: draft
                .placeholder_enabled()
                .then(|| draft.placeholder.clone()),
            kind: draft.kind,
        },
    }
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form ({} fields)", payload.rows.len()));

    for (index, row) in payload.rows.iter().enumerate() {
        let mut entry = match &row.control {
            RowControl::Edit { target, buffer } => {
                format!(" {}. [editing {}] {}_", index, target.as_str(), buffer)
            }
            RowControl::Radio => format!(" {}. {} (radio)", index, row.label),
            RowControl::Text { placeholder, value } => {
                let mut text = format!(" {}. {}", index, row.label);
                match value {
                    Some(value) => text.push_str(&format!(" = {value}")),
                    None if !placeholder.is_empty() => text.push_str(&format!(" [{placeholder}]")),
                    None => {}
                }
                text
            }
        };
        if row.menu_open {
            entry.push_str("  <menu: edit label / edit placeholder>");
        }
        lines.push(entry);
    }

    lines.push("Add new field:".to_string());
    lines.push(format!("  kind: {}", payload.draft.kind.as_str()));
    lines.push(format!("  label: {}", payload.draft.label));
    if let Some(placeholder) = &payload.draft.placeholder {
        lines.push(format!("  placeholder: {placeholder}"));
    }

    lines.join("\n")
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let rows = payload
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut map = Map::new();
            map.insert("index".into(), Value::from(index));
            map.insert("key".into(), Value::String(row.key.clone()));
            map.insert("label".into(), Value::String(row.label.clone()));
            match &row.control {
                RowControl::Edit { target, buffer } => {
                    map.insert("mode".into(), Value::String("edit".into()));
                    map.insert(
                        "edit_target".into(),
                        Value::String(target.as_str().to_string()),
                    );
                    map.insert("edit_buffer".into(), Value::String(buffer.clone()));
                }
                RowControl::Radio => {
                    map.insert("mode".into(), Value::String("display".into()));
                    map.insert("type".into(), Value::String("radio".into()));
                }
                RowControl::Text { placeholder, value } => {
                    map.insert("mode".into(), Value::String("display".into()));
                    map.insert("type".into(), Value::String("text".into()));
                    map.insert("placeholder".into(), Value::String(placeholder.clone()));
                    if let Some(value) = value {
                        map.insert("value".into(), Value::String(value.clone()));
                    }
                }
            }
            map.insert("menu_open".into(), Value::Bool(row.menu_open));
            map.insert("draggable".into(), Value::Bool(row.draggable));
            map.insert("actions".into(), json!(["edit", "delete"]));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "field_count": payload.rows.len(),
        "editing": payload.editing,
        "rows": rows,
        "add_form": {
            "label": payload.draft.label,
            "placeholder": payload.draft.placeholder,
            "type": payload.draft.kind.as_str(),
        },
    })
}
