use crate::spec::{FormSchema, SchemaError};

/// Which field attribute an inline edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Label,
    Placeholder,
}

impl EditTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditTarget::Label => "label",
            EditTarget::Placeholder => "placeholder",
        }
    }
}

/// Inline-edit submachine; at most one field is in an editing state.
///
/// Keystrokes land in the local buffer only. Beginning a new edit while
/// another is in progress drops the old buffer without committing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    EditingLabel {
        index: usize,
        buffer: String,
    },
    EditingPlaceholder {
        index: usize,
        buffer: String,
    },
}

/// A drained edit, ready to be applied to the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub index: usize,
    pub target: EditTarget,
    pub text: String,
}

impl EditState {
    /// Starts a label edit, seeding the buffer from the current text.
    pub fn begin_label(&mut self, index: usize, schema: &FormSchema) -> Result<(), SchemaError> {
        let buffer = schema.field(index)?.label.clone();
        *self = EditState::EditingLabel { index, buffer };
        Ok(())
    }

    /// Starts a placeholder edit, seeding the buffer from the current text.
    pub fn begin_placeholder(
        &mut self,
        index: usize,
        schema: &FormSchema,
    ) -> Result<(), SchemaError> {
        let buffer = schema.field(index)?.placeholder.clone();
        *self = EditState::EditingPlaceholder { index, buffer };
        Ok(())
    }

    /// Replaces the edit buffer; a no-op while idle.
    pub fn set_buffer(&mut self, text: &str) {
        match self {
            EditState::Idle => {}
            EditState::EditingLabel { buffer, .. }
            | EditState::EditingPlaceholder { buffer, .. } => {
                *buffer = text.to_string();
            }
        }
    }

    pub fn is_editing(&self) -> bool {
        !matches!(self, EditState::Idle)
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self {
            EditState::Idle => None,
            EditState::EditingLabel { index, .. }
            | EditState::EditingPlaceholder { index, .. } => Some(*index),
        }
    }

    pub fn target(&self) -> Option<EditTarget> {
        match self {
            EditState::Idle => None,
            EditState::EditingLabel { .. } => Some(EditTarget::Label),
            EditState::EditingPlaceholder { .. } => Some(EditTarget::Placeholder),
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            EditState::Idle => None,
            EditState::EditingLabel { buffer, .. }
            | EditState::EditingPlaceholder { buffer, .. } => Some(buffer),
        }
    }

    /// Takes the pending edit and returns to `Idle`; `None` while idle.
    pub fn take_commit(&mut self) -> Option<EditCommit> {
        match std::mem::take(self) {
            EditState::Idle => None,
            EditState::EditingLabel { index, buffer } => Some(EditCommit {
                index,
                target: EditTarget::Label,
                text: buffer,
            }),
            EditState::EditingPlaceholder { index, buffer } => Some(EditCommit {
                index,
                target: EditTarget::Placeholder,
                text: buffer,
            }),
        }
    }
}
