use super::classify::UnitOutcome;
use super::discipline::{Discipline, Dispatch};
use super::rate_monotonic::RateMonotonic;
use super::release::ReleaseClock;
use super::round_robin::{RotationMode, RoundRobin};
use crate::core::{Thread, ThreadSpec};
use crate::error::{CadenceError, CadenceResult};
use log::{debug, info};
use serde::Serialize;

/// Default frame length used by the console view
pub const DEFAULT_FRAME_LENGTH: u64 = 24;

/// Everything an observer needs to draw one time unit
#[derive(Debug, Clone)]
pub struct UnitReport<'a> {
    pub time: u64,
    pub frame: u64,
    /// Position inside the current frame, starting at 0
    pub frame_offset: u64,
    pub outcomes: &'a [UnitOutcome],
    pub runner: Option<usize>,
    /// Thread whose task retired at the end of this unit
    pub retired: Option<usize>,
}

/// Consumer of the per-unit classification. The scheduler never reads
/// anything back from it.
pub trait RunObserver {
    fn frame_started(&mut self, _frame: u64) {}

    fn unit_finished(&mut self, _report: &UnitReport<'_>) {}
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// One recorded unit of a [`TraceRecorder`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedUnit {
    pub time: u64,
    pub frame: u64,
    pub outcomes: Vec<UnitOutcome>,
    pub runner: Option<usize>,
    pub retired: Option<usize>,
}

/// Observer that keeps every unit in memory
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    pub frames: Vec<u64>,
    pub units: Vec<TracedUnit>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunObserver for TraceRecorder {
    fn frame_started(&mut self, frame: u64) {
        self.frames.push(frame);
    }

    fn unit_finished(&mut self, report: &UnitReport<'_>) {
        self.units.push(TracedUnit {
            time: report.time,
            frame: report.frame,
            outcomes: report.outcomes.to_vec(),
            runner: report.runner,
            retired: report.retired,
        });
    }
}

/// Counters for one thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadStats {
    pub name: String,
    pub priority: u32,
    pub task_size: u32,
    pub period: u32,
    pub created: u64,
    pub completed: u64,
    pub serviced_units: u64,
    pub pending: u64,
}

/// Totals at the end of (or part way through) a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scheduler: String,
    pub discipline: String,
    pub units: u64,
    pub created: u64,
    pub completed: u64,
    pub pending: u64,
    pub idle_units: u64,
    pub threads: Vec<ThreadStats>,
}

impl RunSummary {
    pub fn to_json(&self) -> CadenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Discrete-time scheduler: owns the threads, their release clock and the
/// global time counter, and drives one [`Discipline`] unit by unit.
pub struct Scheduler {
    name: String,
    threads: Vec<Thread>,
    clock: ReleaseClock,
    discipline: Box<dyn Discipline>,
    time: u64,
    frame_length: u64,
    created: u64,
    completed: u64,
    idle_units: u64,
    stats: Vec<ThreadStats>,
    released: Vec<bool>,
}

impl Scheduler {
    /// Build a scheduler over `specs`. Every spec is validated and at least
    /// one thread is required.
    pub fn new(mut discipline: Box<dyn Discipline>, specs: Vec<ThreadSpec>) -> CadenceResult<Self> {
        if specs.is_empty() {
            return Err(CadenceError::EmptyWorkload);
        }
        for (index, spec) in specs.iter().enumerate() {
            spec.validate(index)?;
        }

        let periods: Vec<u32> = specs.iter().map(|s| s.period).collect();
        let stats = specs
            .iter()
            .map(|s| ThreadStats {
                name: s.name.clone(),
                priority: s.priority,
                task_size: s.task_size,
                period: s.period,
                ..Default::default()
            })
            .collect();
        let threads: Vec<Thread> = specs.into_iter().map(Thread::new).collect();

        discipline.reset(&threads);
        let clock = ReleaseClock::new(discipline.release_mode(), &periods);

        Ok(Self {
            name: discipline.name().to_string(),
            released: vec![false; threads.len()],
            threads,
            clock,
            discipline,
            time: 0,
            frame_length: DEFAULT_FRAME_LENGTH,
            created: 0,
            completed: 0,
            idle_units: 0,
            stats,
        })
    }

    /// Fixed-priority scheduler over `specs`
    pub fn rate_monotonic(specs: Vec<ThreadSpec>) -> CadenceResult<Self> {
        Self::new(Box::new(RateMonotonic::new()), specs)
    }

    /// Round-robin scheduler over `specs`
    pub fn round_robin(specs: Vec<ThreadSpec>, mode: RotationMode) -> CadenceResult<Self> {
        Self::new(Box::new(RoundRobin::new(mode)), specs)
    }

    /// Set scheduler name (shown in summaries)
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Units per display frame. Zero is treated as one.
    pub fn with_frame_length(mut self, frame_length: u64) -> Self {
        self.frame_length = frame_length.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discipline(&self) -> &dyn Discipline {
        self.discipline.as_ref()
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Current time (number of units already simulated)
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn frame_length(&self) -> u64 {
        self.frame_length
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Tasks waiting across all queues
    pub fn pending(&self) -> u64 {
        self.threads.iter().map(|t| t.queue().len() as u64).sum()
    }

    /// Rotation cursor of the active discipline, if it has one
    pub fn cursor(&self) -> Option<usize> {
        self.discipline.cursor()
    }

    /// Next absolute release time of thread `index`
    pub fn next_release(&self, index: usize) -> u64 {
        self.clock.next_release(index)
    }

    /// Simulate one unit
    pub fn step(&mut self, observer: &mut dyn RunObserver) {
        let time = self.time;
        let frame = time / self.frame_length;
        if time % self.frame_length == 0 {
            observer.frame_started(frame);
        }

        self.release_due(time);

        let dispatch = self.discipline.select(&self.threads);
        let outcomes = self
            .discipline
            .classify(&self.threads, &self.released, &dispatch);

        let retired = self.execute(&dispatch);
        self.discipline.complete_unit(&dispatch, retired.is_some());

        observer.unit_finished(&UnitReport {
            time,
            frame,
            frame_offset: time % self.frame_length,
            outcomes: &outcomes,
            runner: dispatch.runner,
            retired,
        });

        self.time += 1;
    }

    /// Simulate `units` more units and return the totals
    pub fn run_for(&mut self, units: u64, observer: &mut dyn RunObserver) -> RunSummary {
        info!(
            "{}: running {} units over {} threads",
            self.name,
            units,
            self.threads.len()
        );
        for _ in 0..units {
            self.step(observer);
        }

        let summary = self.summary();
        info!(
            "{}: created {} completed {} pending {}",
            self.name, summary.created, summary.completed, summary.pending
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        let threads = self
            .stats
            .iter()
            .zip(&self.threads)
            .map(|(stats, thread)| ThreadStats {
                pending: thread.queue().len() as u64,
                ..stats.clone()
            })
            .collect();

        RunSummary {
            scheduler: self.name.clone(),
            discipline: self.discipline.name().to_string(),
            units: self.time,
            created: self.created,
            completed: self.completed,
            pending: self.pending(),
            idle_units: self.idle_units,
            threads,
        }
    }

    fn release_due(&mut self, time: u64) {
        for (index, thread) in self.threads.iter_mut().enumerate() {
            let count = self.clock.due(index, time);
            for _ in 0..count {
                thread.release();
            }
            if count > 0 {
                debug!("t={} {} released {} task(s)", time, thread.name(), count);
            }
            self.created += u64::from(count);
            self.stats[index].created += u64::from(count);
            self.released[index] = count > 0;
        }
    }

    /// Service the runner's head task; returns the runner index if that task
    /// completed.
    fn execute(&mut self, dispatch: &Dispatch) -> Option<usize> {
        let Some(index) = dispatch.runner else {
            self.idle_units += 1;
            return None;
        };

        let finished = self.threads[index].service_head()?;
        self.stats[index].serviced_units += 1;
        if !finished {
            return None;
        }

        self.completed += 1;
        self.stats[index].completed += 1;
        debug!("t={} {} completed a task", self.time, self.threads[index].name());
        Some(index)
    }
}
