//! Taskdeck library crate
//!
//! An interactive, single-user to-do manager built on four classic data
//! structures: a singly linked list of active tasks, a FIFO queue of pending
//! tasks, a LIFO stack of deleted tasks for undo, and an unbalanced binary
//! search tree that indexes every activated task by priority.

pub mod cli;
pub mod context;
pub mod models;
pub mod repl;
pub mod structures;

// Re-export commonly used types
pub use context::Context;
pub use models::{Priority, Task, TaskError, MAX_NAME_CHARS};
pub use repl::{MenuChoice, Repl, ReplConfig, ReplError};
