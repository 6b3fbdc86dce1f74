use super::queue::TaskQueue;
use super::task::Task;
use crate::error::{CadenceError, CadenceResult};
use serde::{Deserialize, Serialize};

/// Stationary description of a periodic workload source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Display label (e.g. "T1")
    pub name: String,
    /// Priority rank, lower value = higher priority. Only the fixed-priority
    /// discipline looks at it.
    pub priority: u32,
    /// Requested service of every task this thread releases
    pub task_size: u32,
    /// Time units between successive releases
    pub period: u32,
}

impl ThreadSpec {
    pub fn new(name: impl Into<String>, priority: u32, task_size: u32, period: u32) -> Self {
        Self {
            name: name.into(),
            priority,
            task_size,
            period,
        }
    }

    /// Check the descriptor can produce well-formed tasks. `index` is only
    /// used for the error message.
    pub fn validate(&self, index: usize) -> CadenceResult<()> {
        if self.task_size == 0 {
            return Err(CadenceError::invalid_thread(index, "task_size must be >= 1"));
        }
        if self.period == 0 {
            return Err(CadenceError::invalid_thread(index, "period must be >= 1"));
        }
        Ok(())
    }

    /// Long-run fraction of the processor this thread asks for
    pub fn utilization(&self) -> f64 {
        self.task_size as f64 / self.period as f64
    }
}

/// A workload source together with its pending tasks
#[derive(Debug, Clone)]
pub struct Thread {
    spec: ThreadSpec,
    queue: TaskQueue,
}

impl Thread {
    pub fn new(spec: ThreadSpec) -> Self {
        Self {
            spec,
            queue: TaskQueue::new(),
        }
    }

    pub fn spec(&self) -> &ThreadSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn priority(&self) -> u32 {
        self.spec.priority
    }

    pub fn period(&self) -> u32 {
        self.spec.period
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Append a fresh task of this thread's size
    pub fn release(&mut self) {
        self.queue.push(Task::new(self.spec.task_size));
    }

    /// Serve the head task for one unit, retiring it on completion.
    ///
    /// Returns `None` if nothing is pending, otherwise whether the head task
    /// completed.
    pub fn service_head(&mut self) -> Option<bool> {
        let complete = self.queue.peek_mut()?.service();
        if complete {
            self.queue.pop();
        }
        Some(complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(ThreadSpec::new("T1", 1, 1, 3).validate(0).is_ok());
        assert!(matches!(
            ThreadSpec::new("T1", 1, 0, 3).validate(0),
            Err(CadenceError::InvalidThread { index: 0, .. })
        ));
        assert!(matches!(
            ThreadSpec::new("T2", 1, 1, 0).validate(1),
            Err(CadenceError::InvalidThread { index: 1, .. })
        ));
    }

    #[test]
    fn test_service_head_retires_completed_task() {
        let mut thread = Thread::new(ThreadSpec::new("T1", 1, 2, 3));
        assert_eq!(thread.service_head(), None);

        thread.release();
        thread.release();
        assert_eq!(thread.service_head(), Some(false));
        assert_eq!(thread.service_head(), Some(true));
        assert_eq!(thread.queue().len(), 1);
        assert_eq!(thread.queue().peek().map(Task::serviced), Some(0));
    }

    #[test]
    fn test_utilization() {
        let spec = ThreadSpec::new("T3", 3, 2, 12);
        assert!((spec.utilization() - 1.0 / 6.0).abs() < f64::EPSILON);
    }
}
