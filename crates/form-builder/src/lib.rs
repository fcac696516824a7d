use thiserror::Error;

use form_spec::{
    DeferredFocus, DragState, EditCommit, EditState, EditTarget, FieldDescriptor, FieldDraft,
    FieldKind, FormSchema, KeyAllocator, KeyValueStore, MenuState, RenderPayload, SchemaError,
    StoreError, ValueMap, build_render_payload, load_schema, persist_schema,
};

const FALLBACK_PLACEHOLDER: &str = "Enter value";

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("field label must not be empty")]
    EmptyLabel,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateful builder session.
///
/// Owns the schema, the entered values, and the interaction submachines,
/// and flushes every schema mutation to the store before it becomes
/// observable: the mutated copy is written first and installed in memory
/// only when the write succeeds, so storage and memory cannot diverge.
pub struct BuilderSession {
    store: Box<dyn KeyValueStore>,
    schema: FormSchema,
    values: ValueMap,
    keys: KeyAllocator,
    editor: EditState,
    menu: MenuState,
    drag: DragState,
    focus: DeferredFocus,
    draft: FieldDraft,
}

impl BuilderSession {
    /// Loads the stored schema (or the default) and starts an idle session.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let schema = load_schema(store.as_ref())?;
        let keys = KeyAllocator::seeded_from(&schema);
        Ok(Self {
            store,
            schema,
            values: ValueMap::default(),
            keys,
            editor: EditState::default(),
            menu: MenuState::default(),
            drag: DragState::default(),
            focus: DeferredFocus::default(),
            draft: FieldDraft::default(),
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn draft(&self) -> &FieldDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    fn install(&mut self, next: FormSchema) -> Result<(), StoreError> {
        persist_schema(self.store.as_mut(), &next)?;
        self.schema = next;
        Ok(())
    }

    /// Appends a field with a freshly allocated key, clears the add-form
    /// draft, and queues a focus request for the new row. Returns the row
    /// index of the new field.
    pub fn add_field(
        &mut self,
        label: &str,
        placeholder: &str,
        kind: FieldKind,
    ) -> Result<usize, BuilderError> {
        if label.trim().is_empty() {
            return Err(BuilderError::EmptyLabel);
        }
        let placeholder = match kind {
            FieldKind::Radio => String::new(),
            FieldKind::Text if placeholder.is_empty() => FALLBACK_PLACEHOLDER.to_string(),
            FieldKind::Text => placeholder.to_string(),
        };
        let descriptor = FieldDescriptor {
            key: self.keys.allocate(),
            label: label.to_string(),
            placeholder,
            kind,
        };
        let next = self.schema.append(descriptor);
        self.install(next)?;
        self.draft.clear();
        let index = self.schema.len() - 1;
        self.focus.request(index);
        Ok(index)
    }

    /// Submits the add sub-form using the staged draft inputs.
    pub fn add_field_from_draft(&mut self) -> Result<usize, BuilderError> {
        let FieldDraft {
            label,
            placeholder,
            kind,
        } = self.draft.clone();
        self.add_field(&label, &placeholder, kind)
    }

    pub fn set_draft_label(&mut self, label: &str) {
        self.draft.label = label.to_string();
    }

    pub fn set_draft_placeholder(&mut self, placeholder: &str) {
        self.draft.placeholder = placeholder.to_string();
    }

    pub fn set_draft_kind(&mut self, kind: FieldKind) {
        self.draft.kind = kind;
    }

    pub fn relabel(&mut self, index: usize, label: &str) -> Result<(), BuilderError> {
        let next = self.schema.relabel(index, label)?;
        self.install(next)?;
        Ok(())
    }

    pub fn reword(&mut self, index: usize, placeholder: &str) -> Result<(), BuilderError> {
        let next = self.schema.reword(index, placeholder)?;
        self.install(next)?;
        Ok(())
    }

    /// Removes the field at `index`; its value-map entry is retained.
    pub fn delete_field(&mut self, index: usize) -> Result<(), BuilderError> {
        let next = self.schema.remove(index)?;
        self.install(next)?;
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let next = self.schema.reorder(from, to)?;
        self.install(next)?;
        Ok(())
    }

    pub fn record_value(&mut self, key: &str, value: &str) {
        self.values.record(key, value);
    }

    /// Snapshot of the collected values, for external consumption.
    pub fn submit_form_values(&self) -> &ValueMap {
        &self.values
    }

    pub fn toggle_menu(&mut self, index: usize) {
        self.menu.toggle(index);
    }

    /// Starts an inline label edit and closes any open menu.
    pub fn begin_label_edit(&mut self, index: usize) -> Result<(), BuilderError> {
        self.editor.begin_label(index, &self.schema)?;
        self.menu.close();
        Ok(())
    }

    /// Starts an inline placeholder edit and closes any open menu.
    pub fn begin_placeholder_edit(&mut self, index: usize) -> Result<(), BuilderError> {
        self.editor.begin_placeholder(index, &self.schema)?;
        self.menu.close();
        Ok(())
    }

    pub fn edit_keystroke(&mut self, text: &str) {
        self.editor.set_buffer(text);
    }

    /// Commits the in-progress inline edit; a commit while idle is a
    /// no-op. The caller picks this over `submit_form_values` by
    /// observing `is_editing`.
    pub fn commit_field_edit(&mut self) -> Result<(), BuilderError> {
        let Some(commit) = self.editor.take_commit() else {
            return Ok(());
        };
        let EditCommit {
            index,
            target,
            text,
        } = commit;
        let next = match target {
            EditTarget::Label => self.schema.relabel(index, &text)?,
            EditTarget::Placeholder => self.schema.reword(index, &text)?,
        };
        self.install(next)?;
        Ok(())
    }

    pub fn drag_start(&mut self, index: usize) {
        self.drag.begin(index);
    }

    /// Finishes a drag gesture; a drop with no drag in progress is
    /// ignored.
    pub fn drop_on(&mut self, target: usize) -> Result<(), BuilderError> {
        let Some((from, to)) = self.drag.take_drop(target) else {
            return Ok(());
        };
        self.reorder(from, to)
    }

    /// The focus request queued by the last `add_field`, drained by the
    /// view after its next render pass.
    pub fn take_pending_focus(&mut self) -> Option<usize> {
        self.focus.take()
    }

    pub fn render_payload(&self) -> RenderPayload {
        build_render_payload(
            &self.schema,
            &self.values,
            &self.editor,
            &self.menu,
            &self.draft,
        )
    }
}
