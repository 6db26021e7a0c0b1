//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold tasks in insertion order.
//! - Allocate task ids from a counter owned by the repository.
//!
//! # Invariants
//! - `next_id()` never returns the same id twice for one repository, even
//!   after the task holding it is removed.
//! - `remove()` preserves the relative order of the remaining tasks.
//! - Storage never reorders tasks on its own.

use crate::model::task::{Task, TaskId};

/// Storage seam for the task list store.
pub trait TaskRepository {
    fn next_id(&mut self) -> TaskId;
    fn push(&mut self, task: Task);
    fn get(&self, id: TaskId) -> Option<&Task>;
    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task>;
    fn remove(&mut self, id: TaskId) -> Option<Task>;
    fn tasks(&self) -> &[Task];
}

/// Vec-backed repository. All state is dropped with the value.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Vec<Task>,
    last_id: u64,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn next_id(&mut self) -> TaskId {
        // u64 exhaustion would need ~1.8e19 creates in one session.
        self.last_id = self.last_id.saturating_add(1);
        TaskId::new(self.last_id)
    }

    fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTaskRepository, TaskRepository};
    use crate::model::task::{Task, TaskId};

    fn push_task(repo: &mut InMemoryTaskRepository, text: &str) -> TaskId {
        let id = repo.next_id();
        repo.push(Task::new(id, text).unwrap());
        id
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut repo = InMemoryTaskRepository::new();
        assert_eq!(repo.next_id(), TaskId::new(1));
        assert_eq!(repo.next_id(), TaskId::new(2));
    }

    #[test]
    fn remove_keeps_order_of_remaining_tasks() {
        let mut repo = InMemoryTaskRepository::new();
        let a = push_task(&mut repo, "a");
        let b = push_task(&mut repo, "b");
        let c = push_task(&mut repo, "c");

        let removed = repo.remove(b).unwrap();
        assert_eq!(removed.text(), "b");

        let ids: Vec<TaskId> = repo.tasks().iter().map(Task::id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(repo.remove(b).is_none());
    }

    #[test]
    fn removed_ids_are_not_reallocated() {
        let mut repo = InMemoryTaskRepository::new();
        let first = push_task(&mut repo, "first");
        repo.remove(first).unwrap();

        let second = push_task(&mut repo, "second");
        assert_ne!(first, second);
    }
}
