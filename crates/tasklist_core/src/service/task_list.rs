//! Task list store.
//!
//! # Responsibility
//! - Apply the four list mutations (create, rename, toggle, delete).
//! - Answer the derived remaining-count query.
//! - Notify subscribers after every applied mutation.
//!
//! # Invariants
//! - Mutations never fail. Blank text and unknown ids are reported as
//!   `MutationOutcome::Ignored` and leave the list untouched.
//! - `revision` advances only when a mutation is applied.
//! - The remaining count is derived from the list on every call.
//! - Log records carry ids and outcomes only, never task text.

use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::task_repo::{InMemoryTaskRepository, TaskRepository};
use log::debug;
use serde::Serialize;

/// Why a mutation left the list unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Text was empty or whitespace-only after trimming.
    BlankText,
    /// No task with the requested id exists.
    UnknownTask,
}

impl IgnoreReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::BlankText => "blank_text",
            Self::UnknownTask => "unknown_task",
        }
    }
}

/// Result of a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Created { id: TaskId },
    Renamed { id: TaskId },
    Toggled { id: TaskId, completed: bool },
    Deleted { id: TaskId },
}

/// Handle returned by [`TaskListStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Serializable view of the whole list at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListSnapshot {
    pub tasks: Vec<Task>,
    pub remaining: usize,
    pub revision: u64,
}

type Listener = Box<dyn FnMut(&TaskEvent)>;

/// Authoritative in-memory holder of the task list.
pub struct TaskListStore<R: TaskRepository = InMemoryTaskRepository> {
    repo: R,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    last_subscription: u64,
}

impl TaskListStore<InMemoryTaskRepository> {
    /// Creates an empty store backed by in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(InMemoryTaskRepository::new())
    }
}

impl Default for TaskListStore<InMemoryTaskRepository> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<R: TaskRepository> TaskListStore<R> {
    /// Creates a store over the provided repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            revision: 0,
            listeners: Vec::new(),
            last_subscription: 0,
        }
    }

    /// Appends a new incomplete task.
    ///
    /// # Contract
    /// - Blank input is a no-op and returns `None`.
    /// - Otherwise the trimmed text is stored at the end of the list and the
    ///   fresh id is returned.
    pub fn create(&mut self, raw_text: &str) -> Option<TaskId> {
        let text = match normalize_text(raw_text) {
            Ok(text) => text,
            Err(_) => {
                log_ignored("create", None, IgnoreReason::BlankText);
                return None;
            }
        };

        let id = self.repo.next_id();
        let task = Task::from_normalized(id, text);
        self.repo.push(task);
        self.applied(TaskEvent::Created { id });
        Some(id)
    }

    /// Replaces the text of an existing task.
    ///
    /// Unknown ids are checked before the text, so renaming a missing task
    /// with blank text reports `UnknownTask`.
    pub fn rename(&mut self, id: TaskId, raw_text: &str) -> MutationOutcome {
        let Some(task) = self.repo.get_mut(id) else {
            return ignored("rename", Some(id), IgnoreReason::UnknownTask);
        };
        if task.set_text(raw_text).is_err() {
            return ignored("rename", Some(id), IgnoreReason::BlankText);
        }
        self.applied(TaskEvent::Renamed { id });
        MutationOutcome::Applied
    }

    /// Flips the completion flag of an existing task.
    pub fn toggle_complete(&mut self, id: TaskId) -> MutationOutcome {
        let Some(task) = self.repo.get_mut(id) else {
            return ignored("toggle", Some(id), IgnoreReason::UnknownTask);
        };
        let completed = task.toggle();
        self.applied(TaskEvent::Toggled { id, completed });
        MutationOutcome::Applied
    }

    /// Removes a task permanently.
    pub fn delete(&mut self, id: TaskId) -> MutationOutcome {
        if self.repo.remove(id).is_none() {
            return ignored("delete", Some(id), IgnoreReason::UnknownTask);
        }
        self.applied(TaskEvent::Deleted { id });
        MutationOutcome::Applied
    }

    /// Number of tasks not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.repo
            .tasks()
            .iter()
            .filter(|task| !task.is_completed())
            .count()
    }

    /// Tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        self.repo.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.repo.get(id)
    }

    pub fn len(&self) -> usize {
        self.repo.tasks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.tasks().is_empty()
    }

    /// Count of applied mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener invoked after each applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TaskEvent) + 'static,
    {
        self.last_subscription += 1;
        let id = SubscriptionId(self.last_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Copies the current list state.
    pub fn snapshot(&self) -> TaskListSnapshot {
        TaskListSnapshot {
            tasks: self.repo.tasks().to_vec(),
            remaining: self.remaining_count(),
            revision: self.revision,
        }
    }

    fn applied(&mut self, event: TaskEvent) {
        self.revision += 1;
        let (op, id) = match &event {
            TaskEvent::Created { id } => ("create", *id),
            TaskEvent::Renamed { id } => ("rename", *id),
            TaskEvent::Toggled { id, .. } => ("toggle", *id),
            TaskEvent::Deleted { id } => ("delete", *id),
        };
        debug!(
            "event=task_{} module=store status=ok task_id={} revision={} len={}",
            op,
            id,
            self.revision,
            self.repo.tasks().len()
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

fn ignored(op: &str, id: Option<TaskId>, reason: IgnoreReason) -> MutationOutcome {
    log_ignored(op, id, reason);
    MutationOutcome::Ignored(reason)
}

fn log_ignored(op: &str, id: Option<TaskId>, reason: IgnoreReason) {
    match id {
        Some(id) => debug!(
            "event=task_{} module=store status=ignored reason={} task_id={}",
            op,
            reason.as_str(),
            id
        ),
        None => debug!(
            "event=task_{} module=store status=ignored reason={}",
            op,
            reason.as_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{IgnoreReason, MutationOutcome, TaskEvent, TaskListStore};
    use crate::model::task::TaskId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn rename_unknown_id_wins_over_blank_text() {
        let mut store = TaskListStore::in_memory();
        assert_eq!(
            store.rename(TaskId::new(9), "  "),
            MutationOutcome::Ignored(IgnoreReason::UnknownTask)
        );
    }

    #[test]
    fn listeners_receive_only_applied_events() {
        let mut store = TaskListStore::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let id = store.create("walk dog").unwrap();
        store.create("   ");
        store.toggle_complete(id);
        store.toggle_complete(TaskId::new(99));
        store.rename(id, "walk the dog");
        store.delete(id);

        assert_eq!(
            *seen.borrow(),
            vec![
                TaskEvent::Created { id },
                TaskEvent::Toggled {
                    id,
                    completed: true
                },
                TaskEvent::Renamed { id },
                TaskEvent::Deleted { id },
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut store = TaskListStore::in_memory();
        let count = Rc::new(RefCell::new(0_u32));
        let sink = Rc::clone(&count);
        let handle = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.create("one");
        assert!(store.unsubscribe(handle));
        assert!(!store.unsubscribe(handle));
        store.create("two");

        assert_eq!(*count.borrow(), 1);
    }
}
