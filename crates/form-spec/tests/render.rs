use form_spec::{
    EditState, EditTarget, FieldDescriptor, FieldDraft, FieldKind, MenuState, RowControl,
    ValueMap, build_render_payload, default_schema, render_json_ui, render_text,
};

#[test]
fn display_rows_follow_field_kind_and_values() {
    let schema = default_schema().append(FieldDescriptor {
        key: "new_field_4".into(),
        label: "Gender".into(),
        placeholder: String::new(),
        kind: FieldKind::Radio,
    });
    let mut values = ValueMap::default();
    values.record("first_name", "Ada");
    values.record("new_field_4", "other");

    let payload = build_render_payload(
        &schema,
        &values,
        &EditState::default(),
        &MenuState::default(),
        &FieldDraft::default(),
    );

    assert_eq!(payload.rows.len(), 4);
    assert!(!payload.editing);
    assert!(matches!(
        &payload.rows[0].control,
        RowControl::Text { value: Some(value), .. } if value == "Ada"
    ));
    // Radio rows never surface a pre-filled value, recorded or not.
    assert_eq!(payload.rows[3].control, RowControl::Radio);
    assert!(payload.rows.iter().all(|row| row.draggable));
}

#[test]
fn the_edited_row_carries_the_live_buffer() {
    let schema = default_schema();
    let mut editor = EditState::default();
    editor.begin_label(1, &schema).expect("in range");
    editor.set_buffer("Middle");

    let payload = build_render_payload(
        &schema,
        &ValueMap::default(),
        &editor,
        &MenuState::default(),
        &FieldDraft::default(),
    );

    assert!(payload.editing);
    assert_eq!(
        payload.rows[1].control,
        RowControl::Edit {
            target: EditTarget::Label,
            buffer: "Middle".into(),
        }
    );
    assert!(matches!(payload.rows[0].control, RowControl::Text { .. }));
}

#[test]
fn menu_open_flag_marks_exactly_one_row() {
    let schema = default_schema();
    let mut menu = MenuState::default();
    menu.toggle(2);

    let payload = build_render_payload(
        &schema,
        &ValueMap::default(),
        &EditState::default(),
        &menu,
        &FieldDraft::default(),
    );

    let open = payload
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.menu_open)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    assert_eq!(open, vec![2]);
}

#[test]
fn draft_placeholder_is_hidden_for_radio() {
    let draft = FieldDraft {
        label: "Gender".into(),
        placeholder: "ignored".into(),
        kind: FieldKind::Radio,
    };
    let payload = build_render_payload(
        &default_schema(),
        &ValueMap::default(),
        &EditState::default(),
        &MenuState::default(),
        &draft,
    );
    assert_eq!(payload.draft.placeholder, None);

    let ui = render_json_ui(&payload);
    assert_eq!(ui["add_form"]["placeholder"], serde_json::Value::Null);
    assert_eq!(ui["add_form"]["type"], "radio");
}

#[test]
fn render_text_lists_rows_and_the_add_form() {
    let payload = build_render_payload(
        &default_schema(),
        &ValueMap::default(),
        &EditState::default(),
        &MenuState::default(),
        &FieldDraft::default(),
    );
    let text = render_text(&payload);
    assert!(text.contains("Form (3 fields)"));
    assert!(text.contains("First Name"));
    assert!(text.contains("[Enter Your Middle Name]"));
    assert!(text.contains("Add new field:"));
}

#[test]
fn render_json_ui_exposes_structure() {
    let schema = default_schema();
    let mut values = ValueMap::default();
    values.record("last_name", "Lovelace");
    let mut editor = EditState::default();
    editor.begin_placeholder(0, &schema).expect("in range");

    let payload = build_render_payload(
        &schema,
        &values,
        &editor,
        &MenuState::default(),
        &FieldDraft::default(),
    );
    let ui = render_json_ui(&payload);

    assert_eq!(ui["field_count"], 3);
    assert_eq!(ui["editing"], true);
    let rows = ui["rows"].as_array().expect("rows array");
    assert_eq!(rows[0]["mode"], "edit");
    assert_eq!(rows[0]["edit_target"], "placeholder");
    assert_eq!(rows[0]["edit_buffer"], "Enter Your First Name");
    assert_eq!(rows[2]["value"], "Lovelace");
    assert_eq!(rows[2]["actions"][1], "delete");
}
