//! Pending task queue
//!
//! FIFO staging area for tasks that have not been activated yet. Entries live
//! in an arena of indexed slots linked front to rear; freed slots are reused.

use crate::models::Task;

#[derive(Debug)]
struct Slot {
    task: Option<Task>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
pub struct PendingQueue {
    slots: Vec<Slot>,
    free: Vec<usize>,
    front: Option<usize>,
    rear: Option<usize>,
    len: usize,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task at the rear
    pub fn enqueue(&mut self, task: Task) {
        let slot = Slot {
            task: Some(task),
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        match self.rear {
            Some(rear) => self.slots[rear].next = Some(index),
            None => self.front = Some(index),
        }
        self.rear = Some(index);
        self.len += 1;
    }

    /// Removes and returns the front task
    pub fn dequeue(&mut self) -> Option<Task> {
        let index = self.front?;
        let slot = &mut self.slots[index];
        let task = slot.task.take()?;

        self.front = slot.next.take();
        if self.front.is_none() {
            self.rear = None;
        }
        self.free.push(index);
        self.len -= 1;
        Some(task)
    }

    /// The task `dequeue` would return next
    pub fn peek(&self) -> Option<&Task> {
        self.front
            .and_then(|index| self.slots[index].task.as_ref())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    /// Iterates front to rear
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            next: self.front,
        }
    }
}

pub struct Iter<'a> {
    slots: &'a [Slot],
    next: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let slot = &slots[self.next?];
        self.next = slot.next;
        slot.task.as_ref()
    }
}

impl<'a> IntoIterator for &'a PendingQueue {
    type Item = &'a Task;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
