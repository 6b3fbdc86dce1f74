//! # Cadence Core
//!
//! Discrete-time simulation of single-processor scheduling.
//!
//! Periodic threads release fixed-size tasks into their own FIFO queues and a
//! scheduler hands out one unit of processor time per tick. This crate
//! provides the building blocks:
//!
//! - **Tasks and containers**: `Task`, `TaskQueue`, `TaskStack`
//! - **Threads**: periodic workload sources described by a `ThreadSpec`
//! - **Scheduling**: the tick loop plus rate-monotonic and round-robin
//!   disciplines, built-in workloads and container demos
//! - **Parameters**: run settings loaded from `.cadence/params.yaml`
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence_core::{DisciplineKind, NullObserver, Preset, SimParams, Workload};
//!
//! let params = SimParams::default();
//! let mut scheduler = Preset::new(DisciplineKind::RateMonotonic, Workload::Structured)
//!     .build(&params)
//!     .unwrap();
//! let summary = scheduler.run_for(params.horizon, &mut NullObserver);
//! println!("created {} serviced {}", summary.created, summary.completed);
//! ```

pub mod core;
pub mod error;
pub mod params;
pub mod scheduling;

// Re-export commonly used types for easy access
pub use crate::core::{Task, TaskQueue, TaskStack, Thread, ThreadSpec};
pub use error::{CadenceError, CadenceResult};
pub use params::SimParams;
pub use scheduling::{
    ContainerDemo, ContainerKind, ContainerObserver, DisciplineKind, NullObserver, Preset,
    RotationMode, RunObserver, RunSummary, Scheduler, UnitOutcome, UnitReport, Workload,
};
