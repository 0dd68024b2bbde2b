//! Context module
//!
//! [`Context`] owns all four structures and is the only place they are mutated
//! together. Whenever a task becomes active (add, move from pending, undo) it
//! is prepended to the active list and a copy is inserted into the priority
//! tree. Deletions never touch the tree.

use crate::models::{normalize_name, Task, TaskError};
use crate::structures::{ActiveList, PendingQueue, PriorityTree, UndoStack};

/// State container for a to-do session
#[derive(Default)]
pub struct Context {
    active: ActiveList,
    pending: PendingQueue,
    undo: UndoStack,
    tree: PriorityTree,
}

impl Context {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    fn activate(&mut self, task: Task) -> &Task {
        self.tree.insert(task.clone());
        self.active.push_front(task)
    }

    /// Adds a task to the head of the active list and indexes it by priority
    pub fn add_active(&mut self, task: Task) -> &Task {
        tracing::debug!(
            name = task.name(),
            priority = task.priority().value(),
            "adding active task"
        );
        self.activate(task)
    }

    /// Moves the task at the given 1-based position onto the undo stack
    pub fn delete_at(&mut self, position: usize) -> Result<&Task, TaskError> {
        if self.active.is_empty() {
            return Err(TaskError::NoActiveTasks);
        }

        let Some(task) = self.active.remove_at(position) else {
            tracing::warn!(position, len = self.active.len(), "delete rejected");
            return Err(TaskError::InvalidPosition(position));
        };

        tracing::debug!(position, name = task.name(), "deleted active task");
        Ok(self.undo.push(task))
    }

    /// Marks the task at the given 1-based position as done
    pub fn mark_done_at(&mut self, position: usize) -> Result<&Task, TaskError> {
        if self.active.is_empty() {
            return Err(TaskError::NoActiveTasks);
        }

        let task = self
            .active
            .get_mut(position)
            .ok_or(TaskError::InvalidPosition(position))?;

        if !task.complete() {
            tracing::debug!(position, name = task.name(), "task was already done");
            return Err(TaskError::AlreadyDone(task.name().to_string()));
        }

        tracing::debug!(position, name = task.name(), "marked task done");
        Ok(&*task)
    }

    /// Appends a task to the pending queue
    pub fn add_pending(&mut self, task: Task) {
        tracing::debug!(
            name = task.name(),
            queued = self.pending.len() + 1,
            "queued pending task"
        );
        self.pending.enqueue(task);
    }

    /// Activates the oldest pending task
    pub fn move_pending_to_active(&mut self) -> Result<&Task, TaskError> {
        let task = self.pending.dequeue().ok_or(TaskError::QueueEmpty)?;
        tracing::debug!(name = task.name(), "moved pending task to active");
        Ok(self.activate(task))
    }

    /// Restores the most recently deleted task to the head of the active list
    pub fn undo_delete(&mut self) -> Result<&Task, TaskError> {
        let task = self.undo.pop().ok_or(TaskError::UndoEmpty)?;
        tracing::debug!(name = task.name(), "restored deleted task");
        Ok(self.activate(task))
    }

    /// Finds the first active task with exactly this name, returning its
    /// 1-based position
    pub fn search(&self, name: &str) -> Result<(usize, &Task), TaskError> {
        let name = normalize_name(name);
        match self.active.find(&name) {
            Some(hit) => {
                tracing::debug!(name = %name, position = hit.0, "search hit");
                Ok(hit)
            }
            None => {
                tracing::debug!(name = %name, "search miss");
                Err(TaskError::NotFound(name))
            }
        }
    }

    pub fn active(&self) -> &ActiveList {
        &self.active
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn undo(&self) -> &UndoStack {
        &self.undo
    }

    pub fn tree(&self) -> &PriorityTree {
        &self.tree
    }
}
