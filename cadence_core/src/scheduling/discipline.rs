use super::classify::UnitOutcome;
use super::release::ReleaseMode;
use crate::core::Thread;

/// The per-unit dispatch decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Thread holding the processor this unit, even if it has nothing to run
    pub turn: Option<usize>,
    /// Thread whose head task is serviced
    pub runner: Option<usize>,
}

impl Dispatch {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn run(index: usize) -> Self {
        Self {
            turn: Some(index),
            runner: Some(index),
        }
    }
}

/// A scheduling discipline plugged into the [`Scheduler`](super::Scheduler)
/// tick loop.
///
/// Per unit the scheduler calls `select`, then `classify` on the same
/// pre-service state, services the runner, and finally `complete_unit`.
pub trait Discipline {
    fn name(&self) -> &'static str;

    /// How thread periods translate into release times
    fn release_mode(&self) -> ReleaseMode;

    /// Prepare per-thread state. Called once before the first unit.
    fn reset(&mut self, threads: &[Thread]);

    fn select(&mut self, threads: &[Thread]) -> Dispatch;

    fn classify(
        &self,
        threads: &[Thread],
        released: &[bool],
        dispatch: &Dispatch,
    ) -> Vec<UnitOutcome>;

    /// `finished` is true if the runner's task completed this unit
    fn complete_unit(&mut self, dispatch: &Dispatch, finished: bool);

    /// Position of the rotation cursor, for disciplines that have one
    fn cursor(&self) -> Option<usize> {
        None
    }
}
