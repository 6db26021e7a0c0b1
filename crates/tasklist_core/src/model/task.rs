//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity held by the task list.
//! - Own text normalization so every write path trims the same way.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another task.
//! - `text` is trimmed and never empty.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one task inside a list.
///
/// Allocated from a monotonic counter, so ordering of ids matches creation
/// order even though list order is what the UI displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejection reason for task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTextError {
    /// Input was empty or whitespace-only.
    Blank,
}

impl Display for TaskTextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "task text cannot be blank"),
        }
    }
}

impl Error for TaskTextError {}

/// Trims raw user input and rejects blank results.
pub fn normalize_text(raw: &str) -> Result<String, TaskTextError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskTextError::Blank);
    }
    Ok(trimmed.to_string())
}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
}

impl Task {
    /// Creates an incomplete task from raw input.
    ///
    /// # Errors
    /// - Returns `TaskTextError::Blank` when `raw` trims to nothing.
    pub fn new(id: TaskId, raw: &str) -> Result<Self, TaskTextError> {
        Ok(Self {
            id,
            text: normalize_text(raw)?,
            completed: false,
        })
    }

    /// Builds a task from text that already went through `normalize_text`.
    pub(crate) fn from_normalized(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Current display text (already trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text in place. Leaves the task untouched on blank input.
    pub fn set_text(&mut self, raw: &str) -> Result<(), TaskTextError> {
        self.text = normalize_text(raw)?;
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskTextError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Task::new(record.id, &record.text)?;
        task.completed = record.completed;
        Ok(task)
    }
}
