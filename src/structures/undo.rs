//! Undo stack
//!
//! LIFO history of tasks deleted from the active list.

use crate::models::Task;

type Link = Option<Box<Frame>>;

struct Frame {
    task: Task,
    below: Link,
}

#[derive(Default)]
pub struct UndoStack {
    top: Link,
    len: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a task and returns a reference to the new top
    pub fn push(&mut self, task: Task) -> &Task {
        let frame = Box::new(Frame {
            task,
            below: self.top.take(),
        });
        self.len += 1;
        &self.top.insert(frame).task
    }

    /// Removes and returns the most recently pushed task
    pub fn pop(&mut self) -> Option<Task> {
        self.top.take().map(|frame| {
            let Frame { task, below } = *frame;
            self.top = below;
            self.len -= 1;
            task
        })
    }

    pub fn peek(&self) -> Option<&Task> {
        self.top.as_deref().map(|frame| &frame.task)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }
}

impl Drop for UndoStack {
    fn drop(&mut self) {
        let mut link = self.top.take();
        while let Some(mut frame) = link {
            link = frame.below.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    #[test]
    fn test_lifo_order() {
        let mut stack = UndoStack::new();
        assert!(stack.pop().is_none());

        stack.push(Task::new("first", Priority::High));
        stack.push(Task::new("second", Priority::Low));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().map(Task::name), Some("second"));

        assert_eq!(stack.pop().unwrap().name(), "second");
        assert_eq!(stack.pop().unwrap().name(), "first");
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_returns_task_unchanged() {
        let mut stack = UndoStack::new();
        let mut task = Task::new("finished", Priority::Low);
        task.complete();
        stack.push(task.clone());

        assert_eq!(stack.pop(), Some(task));
    }
}
