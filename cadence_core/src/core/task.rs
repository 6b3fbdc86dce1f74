use serde::Serialize;
use std::fmt;

/// A unit of work released by a thread.
///
/// A task asks for `requested` units of processor time and accumulates
/// `serviced` units as the dispatcher selects it. It is complete once both
/// are equal; servicing a complete task has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    requested: u32,
    serviced: u32,
}

impl Task {
    /// Create a fresh task. `requested` is expected to be at least 1; the
    /// thread descriptors that release tasks enforce this.
    pub fn new(requested: u32) -> Self {
        debug_assert!(requested > 0, "task must request at least one unit");
        Self {
            requested,
            serviced: 0,
        }
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn serviced(&self) -> u32 {
        self.serviced
    }

    /// Units still needed before completion
    pub fn remaining(&self) -> u32 {
        self.requested - self.serviced
    }

    pub fn is_complete(&self) -> bool {
        self.serviced == self.requested
    }

    /// Give the task one unit of service. Returns `true` if the task is
    /// complete afterwards.
    pub fn service(&mut self) -> bool {
        if self.serviced < self.requested {
            self.serviced += 1;
        }
        self.is_complete()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.requested, self.serviced)
    }
}
