//! Domain model for the task list.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` that is never reused.
//! - Deletion is permanent; there is no tombstone state.

pub mod task;
