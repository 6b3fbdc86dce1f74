//! Round-robin dispatch.
//!
//! Two rotation modes are supported:
//!
//! - **Strict**: the turn moves to the next thread every unit, whether or not
//!   the thread holding it had anything to run. Releases use offset
//!   boundaries.
//! - **TimeSliced**: the cursor searches forward (at most one lap) for a
//!   thread with pending work and lets it run until its task completes or it
//!   has used `quantum_limit` consecutive units. An unfinished task keeps its
//!   service and stays at the head of its queue. Releases use aligned
//!   boundaries.

use super::classify::{classify_rotation, UnitOutcome, UnitState};
use super::discipline::{Discipline, Dispatch};
use super::policy::{next_pending_from, pending_flags};
use super::release::ReleaseMode;
use crate::core::Thread;
use log::debug;

/// Default time slice for the time-sliced variant
pub const DEFAULT_QUANTUM_LIMIT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Strict,
    TimeSliced { quantum_limit: u32 },
}

impl RotationMode {
    pub fn time_sliced() -> Self {
        RotationMode::TimeSliced {
            quantum_limit: DEFAULT_QUANTUM_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoundRobin {
    mode: RotationMode,
    current: usize,
    thread_count: usize,
    /// Consecutive units used by each thread in its current slice
    quantum: Vec<u32>,
    /// Lost the processor to quantum expiry and has not run since
    preempted: Vec<bool>,
}

impl RoundRobin {
    pub fn new(mode: RotationMode) -> Self {
        Self {
            mode,
            current: 0,
            thread_count: 0,
            quantum: Vec::new(),
            preempted: Vec::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(RotationMode::Strict)
    }

    pub fn time_sliced(quantum_limit: u32) -> Self {
        Self::new(RotationMode::TimeSliced {
            quantum_limit: quantum_limit.max(1),
        })
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Units the thread has used in its current slice
    pub fn quantum_used(&self, index: usize) -> u32 {
        self.quantum.get(index).copied().unwrap_or(0)
    }

    fn advance_from(&mut self, index: usize) {
        self.current = (index + 1) % self.thread_count;
    }
}

impl Discipline for RoundRobin {
    fn name(&self) -> &'static str {
        match self.mode {
            RotationMode::Strict => "round-robin",
            RotationMode::TimeSliced { .. } => "round-robin (time-sliced)",
        }
    }

    fn release_mode(&self) -> ReleaseMode {
        match self.mode {
            RotationMode::Strict => ReleaseMode::Offset,
            RotationMode::TimeSliced { .. } => ReleaseMode::Aligned,
        }
    }

    fn reset(&mut self, threads: &[Thread]) {
        self.current = 0;
        self.thread_count = threads.len();
        self.quantum = vec![0; threads.len()];
        self.preempted = vec![false; threads.len()];
    }

    fn select(&mut self, threads: &[Thread]) -> Dispatch {
        match self.mode {
            RotationMode::Strict => {
                let turn = self.current;
                if threads[turn].has_pending() {
                    Dispatch::run(turn)
                } else {
                    Dispatch {
                        turn: Some(turn),
                        runner: None,
                    }
                }
            }
            RotationMode::TimeSliced { .. } => {
                // An empty lap leaves the cursor where it was
                match next_pending_from(&pending_flags(threads), self.current) {
                    Some(index) => {
                        self.current = index;
                        Dispatch::run(index)
                    }
                    None => Dispatch::idle(),
                }
            }
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
        classify_rotation(&state, &self.preempted)
    }

    fn complete_unit(&mut self, dispatch: &Dispatch, finished: bool) {
        match self.mode {
            RotationMode::Strict => {
                self.advance_from(self.current);
            }
            RotationMode::TimeSliced { quantum_limit } => {
                let Some(index) = dispatch.runner else {
                    return;
                };
                self.preempted[index] = false;
                self.quantum[index] += 1;

                if finished {
                    self.quantum[index] = 0;
                    self.advance_from(index);
                } else if self.quantum[index] >= quantum_limit {
                    debug!(
                        "thread {} preempted after a {}-unit slice",
                        index, quantum_limit
                    );
                    self.quantum[index] = 0;
                    self.preempted[index] = true;
                    self.advance_from(index);
                }
            }
        }
    }

    fn cursor(&self) -> Option<usize> {
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ThreadSpec;

    fn threads(sizes: &[u32]) -> Vec<Thread> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Thread::new(ThreadSpec::new(format!("T{}", i + 1), 1, size, 4)))
            .collect()
    }

    #[test]
    fn test_strict_counts_empty_turns() {
        let mut rr = RoundRobin::strict();
        let mut threads = threads(&[1, 1, 1]);
        rr.reset(&threads);
        threads[1].release();

        let dispatch = rr.select(&threads);
        assert_eq!(dispatch.turn, Some(0));
        assert_eq!(dispatch.runner, None);
        rr.complete_unit(&dispatch, false);
        assert_eq!(rr.cursor(), Some(1));

        let dispatch = rr.select(&threads);
        assert_eq!(dispatch.runner, Some(1));
        rr.complete_unit(&dispatch, true);
        assert_eq!(rr.cursor(), Some(2));
    }

    #[test]
    fn test_time_sliced_skips_idle_threads() {
        let mut rr = RoundRobin::time_sliced(4);
        let mut threads = threads(&[1, 1, 1]);
        rr.reset(&threads);
        threads[2].release();

        let dispatch = rr.select(&threads);
        assert_eq!(dispatch.runner, Some(2));
        assert_eq!(rr.cursor(), Some(2));
    }

    #[test]
    fn test_time_sliced_empty_lap_keeps_cursor() {
        let mut rr = RoundRobin::time_sliced(4);
        let threads = threads(&[1, 1, 1]);
        rr.reset(&threads);

        let dispatch = rr.select(&threads);
        assert_eq!(dispatch, Dispatch::idle());
        rr.complete_unit(&dispatch, false);
        assert_eq!(rr.cursor(), Some(0));
    }

    #[test]
    fn test_time_sliced_quantum_expiry() {
        let mut rr = RoundRobin::time_sliced(2);
        let mut threads = threads(&[5, 1]);
        rr.reset(&threads);
        threads[0].release();
        threads[1].release();

        for _ in 0..2 {
            let dispatch = rr.select(&threads);
            assert_eq!(dispatch.runner, Some(0));
            let finished = threads[0].service_head() == Some(true);
            rr.complete_unit(&dispatch, finished);
        }

        // Slice used up: the unfinished task stays at the head with its service
        assert_eq!(rr.cursor(), Some(1));
        assert_eq!(rr.quantum_used(0), 0);
        assert_eq!(threads[0].queue().peek().map(|t| t.serviced()), Some(2));

        let dispatch = rr.select(&threads);
        assert_eq!(dispatch.runner, Some(1));
        let outcomes = rr.classify(&threads, &[false, false], &dispatch);
        assert_eq!(outcomes, vec![UnitOutcome::Preempted, UnitOutcome::Running]);
    }
}
