//! Active task list
//!
//! A singly linked list that owns every active task, newest first. Positions
//! handed in and out of this module are 1-based display positions.

use crate::models::Task;

type Link = Option<Box<Node>>;

struct Node {
    task: Task,
    next: Link,
}

/// Completion summary of the active list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in whole percent, truncated. Zero for an empty list.
    pub fn percentage(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.completed * 100 / self.total
    }
}

/// Singly linked list of active tasks, most recently added first
#[derive(Default)]
pub struct ActiveList {
    head: Link,
    len: usize,
}

impl ActiveList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a task and returns a reference to it
    pub fn push_front(&mut self, task: Task) -> &Task {
        let node = Box::new(Node {
            task,
            next: self.head.take(),
        });
        self.len += 1;
        &self.head.insert(node).task
    }

    /// Unlinks the task at the given 1-based position
    pub fn remove_at(&mut self, position: usize) -> Option<Task> {
        if position == 0 || position > self.len {
            return None;
        }

        let mut cursor = &mut self.head;
        for _ in 1..position {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }

        let node = cursor.take()?;
        let Node { task, next } = *node;
        *cursor = next;
        self.len -= 1;
        Some(task)
    }

    /// Gets the task at the given 1-based position
    pub fn get(&self, position: usize) -> Option<&Task> {
        position
            .checked_sub(1)
            .and_then(|index| self.iter().nth(index))
    }

    /// Gets the task at the given 1-based position mutably
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Task> {
        if position == 0 {
            return None;
        }

        let mut current = self.head.as_deref_mut();
        for _ in 1..position {
            current = current?.next.as_deref_mut();
        }
        current.map(|node| &mut node.task)
    }

    /// First task whose name matches exactly, with its 1-based position
    pub fn find(&self, name: &str) -> Option<(usize, &Task)> {
        self.iter()
            .enumerate()
            .find(|(_, task)| task.name() == name)
            .map(|(index, task)| (index + 1, task))
    }

    /// Counts finished tasks against the list length
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.iter().filter(|task| task.is_done()).count(),
            total: self.len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for ActiveList {
    fn drop(&mut self) {
        // Unlink node by node so long lists don't recurse through Box drops
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.task
        })
    }
}

impl<'a> IntoIterator for &'a ActiveList {
    type Item = &'a Task;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
