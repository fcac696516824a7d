use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::field::{FieldDescriptor, FieldKind};

/// Raised when a mutation addresses a row outside the current schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field index {index} is out of bounds for a schema of {len} fields")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Ordered field list; insertion order is the display order.
///
/// Every operation leaves `self` untouched and returns the mutated copy;
/// callers decide when a new value becomes current. The persisted form is
/// the bare JSON array of descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Result<&FieldDescriptor, SchemaError> {
        self.fields.get(index).ok_or(SchemaError::IndexOutOfBounds {
            index,
            len: self.fields.len(),
        })
    }

    /// Appends a descriptor, returning the grown schema.
    pub fn append(&self, descriptor: FieldDescriptor) -> FormSchema {
        let mut fields = self.fields.clone();
        fields.push(descriptor);
        FormSchema { fields }
    }

    /// Replaces the label of the field at `index`.
    pub fn relabel(&self, index: usize, label: &str) -> Result<FormSchema, SchemaError> {
        self.replace_with(index, |field| field.label = label.to_string())
    }

    /// Replaces the placeholder of the field at `index`.
    pub fn reword(&self, index: usize, placeholder: &str) -> Result<FormSchema, SchemaError> {
        self.replace_with(index, |field| field.placeholder = placeholder.to_string())
    }

    /// Removes the descriptor at `index`; all other relative order is kept.
    pub fn remove(&self, index: usize) -> Result<FormSchema, SchemaError> {
        self.guard(index)?;
        let mut fields = self.fields.clone();
        fields.remove(index);
        Ok(FormSchema { fields })
    }

    /// Splices the field out at `from` and back in at `to` in one pass.
    pub fn reorder(&self, from: usize, to: usize) -> Result<FormSchema, SchemaError> {
        self.guard(from)?;
        self.guard(to)?;
        let mut fields = self.fields.clone();
        let moved = fields.remove(from);
        fields.insert(to, moved);
        Ok(FormSchema { fields })
    }

    fn replace_with(
        &self,
        index: usize,
        apply: impl FnOnce(&mut FieldDescriptor),
    ) -> Result<FormSchema, SchemaError> {
        self.guard(index)?;
        let mut fields = self.fields.clone();
        apply(&mut fields[index]);
        Ok(FormSchema { fields })
    }

    fn guard(&self, index: usize) -> Result<(), SchemaError> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(SchemaError::IndexOutOfBounds {
                index,
                len: self.fields.len(),
            })
        }
    }
}

/// Fixed schema used whenever the store has nothing usable.
pub fn default_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDescriptor {
            key: "first_name".into(),
            label: "First Name".into(),
            placeholder: "Enter Your First Name".into(),
            kind: FieldKind::Text,
        },
        FieldDescriptor {
            key: "middle_name".into(),
            label: "Middle Name".into(),
            placeholder: "Enter Your Middle Name".into(),
            kind: FieldKind::Text,
        },
        FieldDescriptor {
            key: "last_name".into(),
            label: "Last Name".into(),
            placeholder: "Enter Your Last Name".into(),
            kind: FieldKind::Text,
        },
    ])
}
