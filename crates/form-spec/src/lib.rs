#![allow(missing_docs)]

pub mod editor;
pub mod gesture;
pub mod keys;
pub mod menu;
pub mod render;
pub mod spec;
pub mod storage_schema;
pub mod store;
pub mod values;

pub use editor::{EditCommit, EditState, EditTarget};
pub use gesture::{DeferredFocus, DragState};
pub use keys::KeyAllocator;
pub use menu::MenuState;
pub use render::{
    RenderDraft, RenderPayload, RenderRow, RowControl, build_render_payload, render_json_ui,
    render_text,
};
pub use spec::{FieldDescriptor, FieldDraft, FieldKind, FormSchema, SchemaError, default_schema};
pub use storage_schema::generate as storage_schema;
pub use store::{
    FileStore, KeyValueStore, MemoryStore, SCHEMA_KEY, StoreError, load_schema, persist_schema,
};
pub use values::ValueMap;
