use form_spec::{
    FieldDescriptor, FieldKind, FileStore, FormSchema, KeyValueStore, MemoryStore, SCHEMA_KEY,
    default_schema, load_schema, persist_schema,
};

#[test]
fn load_returns_default_when_store_is_empty() {
    let store = MemoryStore::new();
    let schema = load_schema(&store).expect("load");
    assert_eq!(schema, default_schema());
}

#[test]
fn persist_then_load_round_trips() {
    let mut store = MemoryStore::new();
    let schema = default_schema().append(FieldDescriptor {
        key: "new_field_4".into(),
        label: "Gender".into(),
        placeholder: String::new(),
        kind: FieldKind::Radio,
    });
    persist_schema(&mut store, &schema).expect("persist");
    let loaded = load_schema(&store).expect("load");
    assert_eq!(loaded, schema);
}

#[test]
fn malformed_blob_falls_back_to_default() {
    let mut store = MemoryStore::new();
    store.put(SCHEMA_KEY, "{not json").expect("put");
    let schema = load_schema(&store).expect("load");
    assert_eq!(schema, default_schema());

    store.put(SCHEMA_KEY, r#"{"wrong": "shape"}"#).expect("put");
    let schema = load_schema(&store).expect("load");
    assert_eq!(schema, default_schema());
}

#[test]
fn blob_written_by_the_original_frontend_loads_unchanged() {
    let mut store = MemoryStore::new();
    let blob = r#"[
        {"key": "first_name", "label": "First Name", "placeholder": "Enter Your First Name", "type": "text"},
        {"key": "new_field_4", "label": "Phone", "placeholder": "Enter phone", "type": "text"}
    ]"#;
    store.put(SCHEMA_KEY, blob).expect("put");
    let schema = load_schema(&store).expect("load");
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.fields()[1].key, "new_field_4");
    assert_eq!(schema.fields()[1].kind, FieldKind::Text);
}

#[test]
fn persisted_form_is_a_bare_descriptor_array() {
    let mut store = MemoryStore::new();
    persist_schema(&mut store, &default_schema()).expect("persist");
    let blob = store.get(SCHEMA_KEY).expect("get").expect("present");
    let value: serde_json::Value = serde_json::from_str(&blob).expect("json");
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["key"], "first_name");
    assert_eq!(entries[0]["type"], "text");
}

#[test]
fn file_store_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path().join("store"));
    assert!(store.get(SCHEMA_KEY).expect("get").is_none());

    let schema = default_schema();
    persist_schema(&mut store, &schema).expect("persist");
    let reopened = FileStore::new(dir.path().join("store"));
    let loaded = load_schema(&reopened).expect("load");
    assert_eq!(loaded, schema);
}

#[test]
fn empty_schema_round_trips() {
    let mut store = MemoryStore::new();
    persist_schema(&mut store, &FormSchema::default()).expect("persist");
    let loaded = load_schema(&store).expect("load");
    assert!(loaded.is_empty());
}
