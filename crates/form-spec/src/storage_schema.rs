use schemars::schema_for;
use serde_json::Value;

use crate::spec::FormSchema;

/// JSON Schema describing the persisted schema document.
pub fn generate() -> Value {
    serde_json::to_value(schema_for!(FormSchema)).unwrap_or(Value::Null)
}
