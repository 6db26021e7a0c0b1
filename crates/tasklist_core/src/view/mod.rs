//! Presentation layer over the task list store.
//!
//! # Responsibility
//! - Keep UI-only state (draft input, editing pointer) out of the store.
//! - Render the list as plain text for terminal front ends.

pub mod render;
pub mod session;
