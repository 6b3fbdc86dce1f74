//! Task containers: the per-thread FIFO used by the schedulers and the LIFO
//! stack used by the stack demo.

use super::task::Task;
use std::collections::VecDeque;

/// First-in-first-out holding area for one thread's pending tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task behind every task already pending
    pub fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    /// Remove and return the oldest task
    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    /// Oldest task without removing it
    pub fn peek(&self) -> Option<&Task> {
        self.tasks.front()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Task> {
        self.tasks.front_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}

/// Last-in-first-out task container.
#[derive(Debug, Clone, Default)]
pub struct TaskStack {
    tasks: Vec<Task>,
}

impl TaskStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the most recently pushed task
    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop()
    }

    pub fn top(&self) -> Option<&Task> {
        self.tasks.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Task> {
        self.tasks.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Iterate bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = TaskQueue::new();
        queue.push(Task::new(1));
        queue.push(Task::new(2));
        queue.push(Task::new(3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek().map(Task::requested), Some(1));
        assert_eq!(queue.pop().map(|t| t.requested()), Some(1));
        assert_eq!(queue.pop().map(|t| t.requested()), Some(2));
        assert_eq!(queue.pop().map(|t| t.requested()), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_access_is_none() {
        let mut queue = TaskQueue::new();
        assert!(queue.peek().is_none());
        assert!(queue.peek_mut().is_none());
        assert!(queue.pop().is_none());

        let mut stack = TaskStack::new();
        assert!(stack.top().is_none());
        assert!(stack.top_mut().is_none());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_peek_mut_services_head_only() {
        let mut queue = TaskQueue::new();
        queue.push(Task::new(2));
        queue.push(Task::new(2));

        if let Some(head) = queue.peek_mut() {
            head.service();
        }

        let serviced: Vec<u32> = queue.iter().map(Task::serviced).collect();
        assert_eq!(serviced, vec![1, 0]);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = TaskStack::new();
        stack.push(Task::new(1));
        stack.push(Task::new(2));

        assert_eq!(stack.top().map(Task::requested), Some(2));
        assert_eq!(stack.pop().map(|t| t.requested()), Some(2));
        assert_eq!(stack.pop().map(|t| t.requested()), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_iterates_bottom_to_top() {
        let mut stack = TaskStack::new();
        stack.push(Task::new(3));
        stack.push(Task::new(5));

        let sizes: Vec<u32> = stack.iter().map(Task::requested).collect();
        assert_eq!(sizes, vec![3, 5]);
        assert_eq!(stack.len(), 2);
    }
}
