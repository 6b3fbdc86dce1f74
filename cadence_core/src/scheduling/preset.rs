//! Built-in workloads.
//!
//! Workloads are fixed example sets; there is no way to inject arbitrary
//! thread sets at runtime. Each discipline has a *structured* workload where
//! every thread gets its share, and a *starved* one where a low-share thread
//! gets little or no service.

use super::round_robin::RotationMode;
use super::scheduler::Scheduler;
use crate::core::ThreadSpec;
use crate::error::CadenceResult;
use crate::params::SimParams;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisciplineKind {
    RateMonotonic,
    RoundRobin,
    TimeSliced,
}

impl DisciplineKind {
    pub fn all() -> [DisciplineKind; 3] {
        [
            DisciplineKind::RateMonotonic,
            DisciplineKind::RoundRobin,
            DisciplineKind::TimeSliced,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisciplineKind::RateMonotonic => "Rate Monotonic",
            DisciplineKind::RoundRobin => "Round Robin",
            DisciplineKind::TimeSliced => "Round Robin (time-sliced)",
        }
    }
}

impl fmt::Display for DisciplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisciplineKind::RateMonotonic => write!(f, "rate-monotonic"),
            DisciplineKind::RoundRobin => write!(f, "round-robin"),
            DisciplineKind::TimeSliced => write!(f, "time-sliced"),
        }
    }
}

impl std::str::FromStr for DisciplineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rate-monotonic" | "rm" | "fixed-priority" => Ok(DisciplineKind::RateMonotonic),
            "round-robin" | "rr" => Ok(DisciplineKind::RoundRobin),
            "time-sliced" | "quantum" | "rr-quantum" => Ok(DisciplineKind::TimeSliced),
            _ => Err(format!(
                "Unknown discipline: {}. Available: rate-monotonic, round-robin, time-sliced",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Workload {
    #[default]
    Structured,
    Starved,
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workload::Structured => write!(f, "structured"),
            Workload::Starved => write!(f, "starved"),
        }
    }
}

impl std::str::FromStr for Workload {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" => Ok(Workload::Structured),
            "starved" => Ok(Workload::Starved),
            _ => Err(format!(
                "Unknown workload: {}. Available: structured, starved",
                s
            )),
        }
    }
}

/// A discipline paired with one of its workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preset {
    pub kind: DisciplineKind,
    pub workload: Workload,
}

impl Preset {
    pub fn new(kind: DisciplineKind, workload: Workload) -> Self {
        Self { kind, workload }
    }

    pub fn description(&self) -> &'static str {
        match (self.kind, self.workload) {
            (DisciplineKind::RateMonotonic, Workload::Structured) => {
                "Harmonic periods 3/6/12/24 at full utilization; every thread meets its share"
            }
            (DisciplineKind::RateMonotonic, Workload::Starved) => {
                "Threads 1-3 saturate the processor; thread 4 never runs"
            }
            (_, Workload::Structured) => "Four unit-sized threads sharing the processor evenly",
            (_, Workload::Starved) => {
                "Growing task sizes; thread 4 needs more than its turns can give"
            }
        }
    }

    /// Thread set for this preset
    pub fn threads(&self) -> Vec<ThreadSpec> {
        let (sizes, periods) = match (self.kind, self.workload) {
            (DisciplineKind::RateMonotonic, Workload::Structured) => ([1, 2, 2, 4], [3, 6, 12, 24]),
            (DisciplineKind::RateMonotonic, Workload::Starved) => ([1, 2, 4, 4], [3, 6, 12, 24]),
            (_, Workload::Structured) => ([1, 1, 1, 1], [4, 4, 4, 4]),
            (_, Workload::Starved) => ([1, 2, 4, 6], [4, 4, 4, 4]),
        };

        sizes
            .iter()
            .zip(periods.iter())
            .enumerate()
            .map(|(i, (&size, &period))| {
                let rank = i as u32 + 1;
                ThreadSpec::new(format!("T{}", rank), rank, size, period)
            })
            .collect()
    }

    /// Build a ready-to-run scheduler for this preset
    pub fn build(&self, params: &SimParams) -> CadenceResult<Scheduler> {
        let threads = self.threads();
        let scheduler = match self.kind {
            DisciplineKind::RateMonotonic => Scheduler::rate_monotonic(threads)?,
            DisciplineKind::RoundRobin => Scheduler::round_robin(threads, RotationMode::Strict)?,
            DisciplineKind::TimeSliced => Scheduler::round_robin(
                threads,
                RotationMode::TimeSliced {
                    quantum_limit: params.quantum_limit,
                },
            )?,
        };

        Ok(scheduler
            .with_name(&self.to_string())
            .with_frame_length(params.frame_length))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.label(), self.workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discipline_parsing() {
        assert_eq!(
            "rate-monotonic".parse::<DisciplineKind>().unwrap(),
            DisciplineKind::RateMonotonic
        );
        assert_eq!("RR".parse::<DisciplineKind>().unwrap(), DisciplineKind::RoundRobin);
        assert_eq!(
            "time-sliced".parse::<DisciplineKind>().unwrap(),
            DisciplineKind::TimeSliced
        );
        assert!("edf".parse::<DisciplineKind>().is_err());

        for kind in DisciplineKind::all() {
            assert_eq!(kind.to_string().parse::<DisciplineKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_workload_parsing() {
        assert_eq!("Starved".parse::<Workload>().unwrap(), Workload::Starved);
        assert_eq!(Workload::default(), Workload::Structured);
        assert!("random".parse::<Workload>().is_err());
    }

    #[test]
    fn test_structured_rate_monotonic_is_fully_utilized() {
        let threads = Preset::new(DisciplineKind::RateMonotonic, Workload::Structured).threads();
        let total: f64 = threads.iter().map(ThreadSpec::utilization).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(
            threads.iter().map(|t| t.priority).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_build_applies_params() {
        let params = SimParams {
            frame_length: 12,
            quantum_limit: 2,
            ..SimParams::default()
        };
        let scheduler = Preset::new(DisciplineKind::TimeSliced, Workload::Starved)
            .build(&params)
            .unwrap();
        assert_eq!(scheduler.frame_length(), 12);
        assert_eq!(scheduler.name(), "Round Robin (time-sliced) (starved)");
        assert_eq!(scheduler.threads().len(), 4);
    }
}
