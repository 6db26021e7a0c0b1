//! Presentation-layer session state.
//!
//! # Responsibility
//! - Own one task list store for the life of a view session.
//! - Hold transient UI state: the new-task draft and the editing pointer.
//! - Translate user intents into store calls.
//!
//! # Invariants
//! - At most one task is being edited at a time.
//! - The editing pointer never refers to a deleted task.
//! - The store is never told about edit mode; it only sees atomic renames.

use crate::model::task::TaskId;
use crate::service::task_list::{IgnoreReason, MutationOutcome, TaskListStore};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditState {
    id: TaskId,
    text: String,
}

/// View-side state wrapped around a [`TaskListStore`].
#[derive(Default)]
pub struct ViewSession {
    store: TaskListStore,
    draft: String,
    editing: Option<EditState>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store, e.g. one seeded before the view opened.
    pub fn with_store(store: TaskListStore) -> Self {
        Self {
            store,
            draft: String::new(),
            editing: None,
        }
    }

    pub fn store(&self) -> &TaskListStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskListStore {
        &mut self.store
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submits the draft as a new task.
    ///
    /// The draft is cleared only when a task was created; blank drafts stay
    /// as typed.
    pub fn submit_draft(&mut self) -> Option<TaskId> {
        let id = self.store.create(&self.draft)?;
        self.draft.clear();
        Some(id)
    }

    /// Id of the task whose editor is open.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing.as_ref().map(|edit| edit.id)
    }

    /// Current edit buffer, if an editor is open.
    pub fn edit_text(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.text.as_str())
    }

    /// Opens the editor for `id`, seeded with its current text.
    ///
    /// Replaces any editor already open. Returns `false` for unknown ids.
    pub fn start_editing(&mut self, id: TaskId) -> bool {
        let Some(task) = self.store.get(id) else {
            return false;
        };
        self.editing = Some(EditState {
            id,
            text: task.text().to_string(),
        });
        true
    }

    /// Replaces the edit buffer. Returns `false` when no editor is open.
    pub fn set_edit_text(&mut self, text: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(edit) => {
                edit.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Commits the edit buffer through the store.
    ///
    /// Blank text leaves the task unchanged and keeps the editor open.
    /// Any other outcome closes the editor.
    pub fn save_edit(&mut self) -> Option<MutationOutcome> {
        let edit = self.editing.as_ref()?;
        let outcome = self.store.rename(edit.id, &edit.text);
        if outcome != MutationOutcome::Ignored(IgnoreReason::BlankText) {
            self.editing = None;
        }
        Some(outcome)
    }

    /// Closes the editor without touching the store.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    pub fn toggle(&mut self, id: TaskId) -> MutationOutcome {
        self.store.toggle_complete(id)
    }

    /// Deletes a task and drops the editing pointer if it targeted that task.
    pub fn delete(&mut self, id: TaskId) -> MutationOutcome {
        let outcome = self.store.delete(id);
        if self.editing() == Some(id) {
            self.editing = None;
            debug!(
                "event=edit_cleared module=view status=ok reason=deleted task_id={}",
                id
            );
        }
        outcome
    }

    /// Maps a 1-based display position to a task id.
    pub fn id_at(&self, position: usize) -> Option<TaskId> {
        position
            .checked_sub(1)
            .and_then(|index| self.store.tasks().get(index))
            .map(|task| task.id())
    }
}
