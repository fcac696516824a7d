pub mod field;
pub mod schema;

pub use field::{FieldDescriptor, FieldDraft, FieldKind};
pub use schema::{FormSchema, SchemaError, default_schema};
