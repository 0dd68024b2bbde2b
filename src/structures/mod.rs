//! Structures module
//!
//! The four containers the to-do manager is built on: a singly linked list of
//! active tasks, a FIFO queue of pending tasks, a LIFO stack of deleted tasks
//! and an append-only binary search tree indexed by priority.

pub mod active;
pub mod pending;
pub mod priority_tree;
pub mod undo;

// Re-export commonly used types
pub use active::{ActiveList, Progress};
pub use pending::PendingQueue;
pub use priority_tree::PriorityTree;
pub use undo::UndoStack;
