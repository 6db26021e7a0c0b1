//! Repository layer for task storage.
//!
//! # Responsibility
//! - Define the storage contract the task list store is written against.
//! - Keep ordering and id allocation out of the store's business rules.
//!
//! # Invariants
//! - Repositories never validate text; the model constructors do.

pub mod task_repo;
