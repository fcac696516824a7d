use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::spec::{FormSchema, default_schema};

/// Storage key the schema blob lives under. Matches the document key used
/// by earlier deployments so their blobs load unchanged.
pub const SCHEMA_KEY: &str = "dynamicJson";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store access failed: {0}")]
    Io(#[from] io::Error),
    #[error("schema encode failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Synchronous key-value collaborator the schema persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable store keeping one document per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.document_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.document_path(key), value)?;
        Ok(())
    }
}

/// Reads the stored schema. A missing key is the expected initial
/// condition and an unparseable blob is treated the same way; both fall
/// back to the built-in default. Backend failures propagate.
pub fn load_schema(store: &dyn KeyValueStore) -> Result<FormSchema, StoreError> {
    match store.get(SCHEMA_KEY)? {
        Some(blob) => Ok(serde_json::from_str(&blob).unwrap_or_else(|_| default_schema())),
        None => Ok(default_schema()),
    }
}

/// Writes the full schema under the fixed key; one write per mutation.
pub fn persist_schema(
    store: &mut dyn KeyValueStore,
    schema: &FormSchema,
) -> Result<(), StoreError> {
    let blob = serde_json::to_string(schema).map_err(StoreError::Serialize)?;
    store.put(SCHEMA_KEY, &blob)
}
