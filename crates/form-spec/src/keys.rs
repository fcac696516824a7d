use crate::spec::FormSchema;

const KEY_PREFIX: &str = "new_field_";

/// Mints `new_field_<n>` identifiers that never repeat within a session.
///
/// The counter starts past both the schema length and the highest numbered
/// key already present, so an identifier freed by a deletion is not handed
/// out a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAllocator {
    next: usize,
}

impl KeyAllocator {
    pub fn seeded_from(schema: &FormSchema) -> Self {
        let mut next = schema.len() + 1;
        for field in schema.fields() {
            if let Some(suffix) = field.key.strip_prefix(KEY_PREFIX)
                && let Ok(taken) = suffix.parse::<usize>()
            {
                next = next.max(taken + 1);
            }
        }
        KeyAllocator { next }
    }

    pub fn allocate(&mut self) -> String {
        let key = format!("{KEY_PREFIX}{}", self.next);
        self.next += 1;
        key
    }
}
