//! Single-container demos.
//!
//! A lone [`TaskStack`] or [`TaskQueue`] is fed random tasks and serviced one
//! unit at a time, which shows the difference between LIFO and FIFO service
//! order before any scheduling is involved.

use super::scheduler::NullObserver;
use crate::core::{Task, TaskQueue, TaskStack};
use crate::error::CadenceResult;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

/// Largest task size the demo generates
pub const MAX_DEMO_TASK: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Stack,
    Queue,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Stack => write!(f, "stack"),
            ContainerKind::Queue => write!(f, "queue"),
        }
    }
}

impl std::str::FromStr for ContainerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stack" | "lifo" => Ok(ContainerKind::Stack),
            "queue" | "fifo" => Ok(ContainerKind::Queue),
            _ => Err(format!("Unknown container: {}. Available: stack, queue", s)),
        }
    }
}

/// Container contents after one unit, in display order
#[derive(Debug, Clone)]
pub struct ContainerSnapshot<'a> {
    pub unit: u64,
    pub created: bool,
    pub completed: bool,
    pub tasks: Vec<&'a Task>,
}

pub trait ContainerObserver {
    fn unit_finished(&mut self, _snapshot: &ContainerSnapshot<'_>) {}
}

impl ContainerObserver for NullObserver {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSummary {
    pub kind: ContainerKind,
    pub units: u64,
    pub created: u64,
    pub completed: u64,
    pub remaining: u64,
}

impl DemoSummary {
    pub fn to_json(&self) -> CadenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone)]
enum Container {
    Stack(TaskStack),
    Queue(TaskQueue),
}

pub struct ContainerDemo {
    kind: ContainerKind,
    container: Container,
    rng: StdRng,
    unit: u64,
    created: u64,
    completed: u64,
}

impl ContainerDemo {
    /// Seeded demos are reproducible; without a seed the run draws from OS
    /// entropy.
    pub fn new(kind: ContainerKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let container = match kind {
            ContainerKind::Stack => Container::Stack(TaskStack::new()),
            ContainerKind::Queue => Container::Queue(TaskQueue::new()),
        };

        Self {
            kind,
            container,
            rng,
            unit: 0,
            created: 0,
            completed: 0,
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        match &self.container {
            Container::Stack(stack) => stack.len(),
            Container::Queue(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tasks in display order: bottom to top for a stack, head to tail for a
    /// queue
    pub fn tasks(&self) -> Vec<&Task> {
        match &self.container {
            Container::Stack(stack) => stack.iter().collect(),
            Container::Queue(queue) => queue.iter().collect(),
        }
    }

    /// One unit: maybe add a task (1 in 5), then service the next task out
    pub fn step(&mut self, observer: &mut dyn ContainerObserver) {
        let created = self.rng.gen_ratio(1, 5);
        if created {
            let task = Task::new(self.rng.gen_range(1..=MAX_DEMO_TASK));
            debug!("unit {}: {} push {}", self.unit, self.kind, task);
            self.push(task);
            self.created += 1;
        }

        let completed = self.service_next();
        if completed {
            self.completed += 1;
        }

        observer.unit_finished(&ContainerSnapshot {
            unit: self.unit,
            created,
            completed,
            tasks: self.tasks(),
        });
        self.unit += 1;
    }

    pub fn run_for(&mut self, units: u64, observer: &mut dyn ContainerObserver) -> DemoSummary {
        info!("{} demo: running {} units", self.kind, units);
        for _ in 0..units {
            self.step(observer);
        }
        self.summary()
    }

    pub fn summary(&self) -> DemoSummary {
        DemoSummary {
            kind: self.kind,
            units: self.unit,
            created: self.created,
            completed: self.completed,
            remaining: self.len() as u64,
        }
    }

    fn push(&mut self, task: Task) {
        match &mut self.container {
            Container::Stack(stack) => stack.push(task),
            Container::Queue(queue) => queue.push(task),
        }
    }

    /// Service the top (stack) or head (queue); completed tasks are removed
    fn service_next(&mut self) -> bool {
        match &mut self.container {
            Container::Stack(stack) => {
                let done = stack.top_mut().map(Task::service);
                if done == Some(true) {
                    stack.pop();
                    return true;
                }
                false
            }
            Container::Queue(queue) => {
                let done = queue.peek_mut().map(Task::service);
                if done == Some(true) {
                    queue.pop();
                    return true;
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sizes(Vec<Vec<(u32, u32)>>);

    impl ContainerObserver for Sizes {
        fn unit_finished(&mut self, snapshot: &ContainerSnapshot<'_>) {
            self.0.push(
                snapshot
                    .tasks
                    .iter()
                    .map(|t| (t.requested(), t.serviced()))
                    .collect(),
            );
        }
    }

    #[test]
    fn test_container_parsing() {
        assert_eq!("Stack".parse::<ContainerKind>().unwrap(), ContainerKind::Stack);
        assert_eq!("fifo".parse::<ContainerKind>().unwrap(), ContainerKind::Queue);
        assert!("heap".parse::<ContainerKind>().is_err());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = ContainerDemo::new(ContainerKind::Queue, Some(7));
        let mut b = ContainerDemo::new(ContainerKind::Queue, Some(7));
        assert_eq!(
            a.run_for(500, &mut NullObserver),
            b.run_for(500, &mut NullObserver)
        );
    }

    #[test]
    fn test_every_task_is_accounted_for() {
        for kind in [ContainerKind::Stack, ContainerKind::Queue] {
            let mut demo = ContainerDemo::new(kind, Some(42));
            let summary = demo.run_for(2_000, &mut NullObserver);
            assert_eq!(summary.units, 2_000);
            assert_eq!(summary.created, summary.completed + summary.remaining);
            assert!(summary.created > 0);
        }
    }

    #[test]
    fn test_only_the_serviced_end_makes_progress() {
        let mut demo = ContainerDemo::new(ContainerKind::Queue, Some(3));
        let mut sizes = Sizes::default();
        demo.run_for(1_000, &mut sizes);

        for unit in &sizes.0 {
            for (i, &(requested, serviced)) in unit.iter().enumerate() {
                assert!(serviced <= requested);
                assert!((1..=MAX_DEMO_TASK).contains(&requested));
                // Everything behind the head is untouched
                if i > 0 {
                    assert_eq!(serviced, 0);
                }
            }
        }
    }
}
