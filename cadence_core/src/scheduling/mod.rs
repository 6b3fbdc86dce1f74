//! # Cadence Scheduling
//!
//! Discrete-time dispatch of periodic threads onto a single processor:
//!
//! - **Scheduler**: the tick loop (release, select, classify, service)
//! - **Disciplines**: fixed-priority (rate-monotonic) and round-robin, the
//!   latter either strict or time-sliced
//! - **Presets**: built-in structured and starved workloads
//! - **Demos**: a lone stack or queue serviced without any scheduling
//!
//! ## Usage
//!
//! ```rust
//! use cadence_core::scheduling::{NullObserver, RotationMode, Scheduler};
//! use cadence_core::ThreadSpec;
//!
//! let threads = vec![
//!     ThreadSpec::new("T1", 1, 1, 4),
//!     ThreadSpec::new("T2", 2, 2, 4),
//! ];
//! let mut scheduler = Scheduler::round_robin(threads, RotationMode::time_sliced()).unwrap();
//! let summary = scheduler.run_for(100, &mut NullObserver);
//! assert_eq!(summary.created, summary.completed + summary.pending);
//! ```

pub mod classify;
pub mod demo;
pub mod discipline;
pub mod policy;
pub mod preset;
pub mod rate_monotonic;
pub mod release;
pub mod round_robin;
pub mod scheduler;

pub use classify::UnitOutcome;
pub use demo::{ContainerDemo, ContainerKind, ContainerObserver, ContainerSnapshot, DemoSummary};
pub use discipline::{Discipline, Dispatch};
pub use preset::{DisciplineKind, Preset, Workload};
pub use rate_monotonic::RateMonotonic;
pub use release::{ReleaseClock, ReleaseMode};
pub use round_robin::{RotationMode, RoundRobin, DEFAULT_QUANTUM_LIMIT};
pub use scheduler::{
    NullObserver, RunObserver, RunSummary, Scheduler, ThreadStats, TraceRecorder, TracedUnit,
    UnitReport, DEFAULT_FRAME_LENGTH,
};
