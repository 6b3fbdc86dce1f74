//! Per-unit outcome classification.
//!
//! Every time unit each thread is put into exactly one [`UnitOutcome`]. The
//! classification is computed from the state at dispatch time (after
//! releases, before the runner is serviced) and has no rendering concerns.

use serde::Serialize;
use std::fmt;

/// What a single thread did during one time unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitOutcome {
    /// Released a task this unit and ran
    RunningCreated,
    /// Ran a task released earlier
    Running,
    /// Released a task this unit but another thread ran
    CreatedPreempted,
    /// Has pending work and lost the processor to a higher-priority thread
    /// or to quantum expiry
    Preempted,
    /// Released a task this unit; not running but not outranked either
    Created,
    /// Has pending work and is waiting for its turn
    Waiting,
    /// Held the turn with nothing to run
    IdleTurn,
    /// Nothing pending
    Idle,
}

impl UnitOutcome {
    pub const ALL: [UnitOutcome; 8] = [
        UnitOutcome::Running,
        UnitOutcome::Preempted,
        UnitOutcome::Waiting,
        UnitOutcome::Idle,
        UnitOutcome::Created,
        UnitOutcome::RunningCreated,
        UnitOutcome::CreatedPreempted,
        UnitOutcome::IdleTurn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunningCreated => "Task created and executed",
            Self::Running => "Running task",
            Self::CreatedPreempted => "Task created but preempted",
            Self::Preempted => "Preempted task",
            Self::Created => "Task created",
            Self::Waiting => "Waiting for turn",
            Self::IdleTurn => "Time unit run without task",
            Self::Idle => "No task",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running | Self::RunningCreated)
    }

    pub fn is_created(&self) -> bool {
        matches!(
            self,
            Self::RunningCreated | Self::CreatedPreempted | Self::Created
        )
    }
}

impl fmt::Display for UnitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread flags at dispatch time
#[derive(Debug, Clone, Copy)]
pub struct UnitState<'a> {
    /// Queue non-empty (after this unit's releases)
    pub pending: &'a [bool],
    /// Released at least one task this unit
    pub released: &'a [bool],
    /// Thread whose head task is serviced this unit
    pub runner: Option<usize>,
    /// Thread holding the turn; differs from `runner` only for an idle turn
    pub turn: Option<usize>,
}

/// Fixed-priority classification. Only threads with a strictly lower
/// priority (numerically greater rank) than the runner count as preempted.
pub fn classify_fixed_priority(state: &UnitState<'_>, priorities: &[u32]) -> Vec<UnitOutcome> {
    (0..state.pending.len())
        .map(|i| {
            if state.runner == Some(i) {
                return running(state.released[i]);
            }
            if !state.pending[i] {
                return UnitOutcome::Idle;
            }

            let outranked = state
                .runner
                .is_some_and(|r| priorities[i] > priorities[r]);
            match (state.released[i], outranked) {
                (true, true) => UnitOutcome::CreatedPreempted,
                (true, false) => UnitOutcome::Created,
                (false, true) => UnitOutcome::Preempted,
                (false, false) => UnitOutcome::Waiting,
            }
        })
        .collect()
}

/// Round-robin classification. `preempted` marks threads that lost the
/// processor to quantum expiry and have not run since.
pub fn classify_rotation(state: &UnitState<'_>, preempted: &[bool]) -> Vec<UnitOutcome> {
    (0..state.pending.len())
        .map(|i| {
            if state.runner == Some(i) {
                running(state.released[i])
            } else if state.turn == Some(i) {
                UnitOutcome::IdleTurn
            } else if !state.pending[i] {
                UnitOutcome::Idle
            } else if state.released[i] {
                UnitOutcome::CreatedPreempted
            } else if preempted.get(i).copied().unwrap_or(false) {
                UnitOutcome::Preempted
            } else {
                UnitOutcome::Waiting
            }
        })
        .collect()
}

fn running(released: bool) -> UnitOutcome {
    if released {
        UnitOutcome::RunningCreated
    } else {
        UnitOutcome::Running
    }
}
