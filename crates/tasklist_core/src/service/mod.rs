//! Core use-case services.
//!
//! # Responsibility
//! - Apply list mutations on top of a repository.
//! - Keep view layers decoupled from storage details.

pub mod task_list;
