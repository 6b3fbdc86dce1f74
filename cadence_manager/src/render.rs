//! Console rendering of scheduler runs and container demos
//!
//! One line per time unit: a fixed-width colored glyph per thread followed by
//! the position inside the current frame.

use cadence_core::scheduling::{
    ContainerKind, ContainerObserver, ContainerSnapshot, DemoSummary, RunObserver, RunSummary,
    UnitOutcome, UnitReport,
};
use colored::*;
use std::io::{self, Write};

/// Printed whenever a new frame starts
pub const FRAME_MARKER: &str = "▓▒░▓▒░▓▒░▓▒░ | New Frame";

const CELL: &str = "▓▒░";
const EMPTY_CELL: &str = "▒▒▒";
const KEY_SWATCH: &str = "█▓▒░";

/// Glyph drawn for an outcome in the per-unit line
pub fn glyph(outcome: UnitOutcome) -> &'static str {
    match outcome {
        UnitOutcome::Idle => EMPTY_CELL,
        _ => CELL,
    }
}

fn paint(text: &str, outcome: UnitOutcome) -> ColoredString {
    match outcome {
        UnitOutcome::RunningCreated => text.cyan(),
        UnitOutcome::Running => text.green(),
        UnitOutcome::CreatedPreempted => text.yellow(),
        UnitOutcome::Preempted => text.red(),
        UnitOutcome::Created => text.blue(),
        UnitOutcome::Waiting => text.red().dimmed(),
        // orange
        UnitOutcome::IdleTurn => text.truecolor(255, 165, 0),
        UnitOutcome::Idle => text.bright_black(),
    }
}

/// Writes runs and demos to any `Write` sink.
///
/// The observer callbacks cannot fail, so the first I/O error is kept and
/// returned by [`ConsoleRenderer::finish`].
pub struct ConsoleRenderer<W: Write> {
    out: W,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            error: None,
        }
    }

    fn styled(&self, text: &str, outcome: UnitOutcome) -> String {
        if self.color {
            paint(text, outcome).to_string()
        } else {
            text.to_string()
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    /// Totals printed after a scheduler run
    pub fn write_run_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Total tasks created: {}", summary.created)?;
        writeln!(self.out, "Total tasks serviced: {}", summary.completed)?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{:<8} {:>8} {:>6} {:>6} {:>8} {:>10} {:>8}",
            "Thread", "Priority", "Size", "Period", "Created", "Completed", "Pending"
        )?;
        for thread in &summary.threads {
            writeln!(
                self.out,
                "{:<8} {:>8} {:>6} {:>6} {:>8} {:>10} {:>8}",
                thread.name,
                thread.priority,
                thread.task_size,
                thread.period,
                thread.created,
                thread.completed,
                thread.pending
            )?;
        }
        Ok(())
    }

    /// Totals printed after a container demo
    pub fn write_demo_summary(&mut self, summary: &DemoSummary) -> io::Result<()> {
        writeln!(self.out, "Tasks completed: {}", summary.completed)?;
        let container = match summary.kind {
            ContainerKind::Stack => "stack",
            ContainerKind::Queue => "queue",
        };
        writeln!(self.out, "Tasks left in {}: {}", container, summary.remaining)
    }

    pub fn write_color_key(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Color Key:")?;
        for outcome in UnitOutcome::ALL {
            let swatch = self.styled(KEY_SWATCH, outcome);
            writeln!(self.out, "{}: {}", swatch, outcome.as_str())?;
        }
        writeln!(self.out)
    }

    /// Flush and surface any error hit while observing
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RunObserver for ConsoleRenderer<W> {
    fn frame_started(&mut self, _frame: u64) {
        let result = writeln!(self.out, "{}", FRAME_MARKER);
        self.record(result);
    }

    fn unit_finished(&mut self, report: &UnitReport<'_>) {
        let mut line = String::new();
        for &outcome in report.outcomes {
            line.push_str(&self.styled(glyph(outcome), outcome));
        }
        let result = writeln!(self.out, "{} | {}", line, report.frame_offset + 1);
        self.record(result);
    }
}

impl<W: Write> ContainerObserver for ConsoleRenderer<W> {
    fn unit_finished(&mut self, snapshot: &ContainerSnapshot<'_>) {
        let mut line = String::from("|");
        for task in &snapshot.tasks {
            line.push(' ');
            line.push_str(&task.to_string());
        }
        let result = writeln!(self.out, "{}", line);
        self.record(result);
    }
}
