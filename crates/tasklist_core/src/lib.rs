//! Core domain logic for the task list editor.
//! This crate is the single source of truth for list invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{normalize_text, Task, TaskId, TaskTextError};
pub use repo::task_repo::{InMemoryTaskRepository, TaskRepository};
pub use service::task_list::{
    IgnoreReason, MutationOutcome, SubscriptionId, TaskEvent, TaskListSnapshot, TaskListStore,
};
pub use view::render::render;
pub use view::session::ViewSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
