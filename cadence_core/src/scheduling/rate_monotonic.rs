//! Fixed-priority preemptive dispatch.
//!
//! Each unit the pending thread with the numerically lowest priority runs.
//! With priorities assigned by period (shorter period = higher priority) this
//! is rate-monotonic scheduling.

use super::classify::{classify_fixed_priority, UnitOutcome, UnitState};
use super::discipline::{Discipline, Dispatch};
use super::policy::{highest_priority_pending, pending_flags};
use super::release::ReleaseMode;
use crate::core::Thread;

#[derive(Debug, Clone, Default)]
pub struct RateMonotonic {
    priorities: Vec<u32>,
}

impl RateMonotonic {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Discipline for RateMonotonic {
    fn name(&self) -> &'static str {
        "rate-monotonic"
    }

    fn release_mode(&self) -> ReleaseMode {
        ReleaseMode::Offset
    }

    fn reset(&mut self, threads: &[Thread]) {
        self.priorities = threads.iter().map(Thread::priority).collect();
    }

    fn select(&mut self, threads: &[Thread]) -> Dispatch {
        match highest_priority_pending(&pending_flags(threads), &self.priorities) {
            Some(index) => Dispatch::run(index),
            None => Dispatch::idle(),
        }
    }

    fn classify(
        &self,
        threads: &[Thread],
        released: &[bool],
        dispatch: &Dispatch,
    ) -> Vec<UnitOutcome> {
        let pending = pending_flags(threads);
        let state = UnitState {
            pending: &pending,
            released,
            runner: dispatch.runner,
            turn: dispatch.turn,
        };
        classify_fixed_priority(&state, &self.priorities)
    }

    fn complete_unit(&mut self, _dispatch: &Dispatch, _finished: bool) {}
}
