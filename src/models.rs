//! Core models for the taskdeck library
//!
//! This module contains the task record, its priority scale and the error type
//! shared by every structure and the dispatcher.

use std::fmt;

/// Maximum number of visible characters kept from a task name
pub const MAX_NAME_CHARS: usize = 29;

/// Errors reported back to the user. None of them are fatal; the operation is
/// aborted and state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Invalid priority! Setting to Medium (2).")]
    InvalidPriority(String),

    #[error("Invalid task number.")]
    InvalidPosition(usize),

    #[error("No active tasks found.")]
    NoActiveTasks,

    #[error("No pending tasks to move.")]
    QueueEmpty,

    #[error("No deleted tasks to restore.")]
    UndoEmpty,

    #[error("Task is already marked as done!")]
    AlreadyDone(String),

    #[error("Task \"{0}\" not found.")]
    NotFound(String),
}

/// Task priority. Lower numbers are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    High = 1,
    #[default]
    Medium = 2,
    Low = 3,
}

impl Priority {
    /// Numeric value shown to the user (1, 2 or 3)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Label used in the priority legend
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parses a priority typed by the user. Anything other than 1, 2 or 3 is
    /// rejected, including non-numeric text.
    pub fn from_input(input: &str) -> Result<Self, TaskError> {
        let input = input.trim();
        input
            .parse::<i64>()
            .map_err(|_| TaskError::InvalidPriority(input.to_string()))
            .and_then(Self::try_from)
    }

    /// Like [`Priority::from_input`], but falls back to Medium. The rejection
    /// is returned alongside so callers can tell the user.
    pub fn clamped(input: &str) -> (Self, Option<TaskError>) {
        match Self::from_input(input) {
            Ok(priority) => (priority, None),
            Err(e) => (Priority::Medium, Some(e)),
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = TaskError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(TaskError::InvalidPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Strips the trailing line terminator and cuts the name down to
/// [`MAX_NAME_CHARS`] characters.
pub fn normalize_name(raw: &str) -> String {
    raw.trim_end_matches(['\n', '\r'])
        .chars()
        .take(MAX_NAME_CHARS)
        .collect()
}

/// A single to-do item. Name and priority are fixed at creation; `done` only
/// ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    priority: Priority,
    done: bool,
}

impl Task {
    /// Creates a new, unfinished task. The name is normalised with
    /// [`normalize_name`].
    pub fn new(name: &str, priority: Priority) -> Self {
        Self {
            name: normalize_name(name),
            priority,
            done: false,
        }
    }

    /// Marks this task as done. Returns false if it already was.
    pub(crate) fn complete(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        true
    }

    /// Gets the name of this task
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the priority of this task
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Checks if this task is done
    pub fn is_done(&self) -> bool {
        self.done
    }
}
