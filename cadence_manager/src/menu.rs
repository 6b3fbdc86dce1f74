//! Interactive menu
//!
//! ```text
//! S - Stack            1 - Rate Monotonic    K - Print Color Key
//! Q - Queue            2 - Round Robin       E - Exit
//! ```
//!
//! Selections are case-insensitive. Invalid input is reported and the same
//! menu is shown again; end of input exits.

use crate::commands;
use crate::render::ConsoleRenderer;
use anyhow::Result;
use cadence_core::scheduling::{ContainerKind, DisciplineKind, Preset, Workload};
use cadence_core::SimParams;
use std::io::{BufRead, Write};
use tracing::debug;

/// What the user picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Demo(ContainerKind),
    RateMonotonic,
    RoundRobin,
    ColorKey,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "s" => Some(MenuChoice::Demo(ContainerKind::Stack)),
            "q" => Some(MenuChoice::Demo(ContainerKind::Queue)),
            "1" => Some(MenuChoice::RateMonotonic),
            "2" => Some(MenuChoice::RoundRobin),
            "k" => Some(MenuChoice::ColorKey),
            "e" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Preset picked from the rate-monotonic submenu
pub fn parse_rate_monotonic(input: &str) -> Option<Preset> {
    let workload = match input.trim() {
        "1" => Workload::Structured,
        "2" => Workload::Starved,
        _ => return None,
    };
    Some(Preset::new(DisciplineKind::RateMonotonic, workload))
}

/// Preset picked from the round-robin submenu
pub fn parse_round_robin(input: &str) -> Option<Preset> {
    let (kind, workload) = match input.trim() {
        "1" => (DisciplineKind::RoundRobin, Workload::Structured),
        "2" => (DisciplineKind::RoundRobin, Workload::Starved),
        "3" => (DisciplineKind::TimeSliced, Workload::Structured),
        "4" => (DisciplineKind::TimeSliced, Workload::Starved),
        _ => return None,
    };
    Some(Preset::new(kind, workload))
}

pub struct Menu<R, W> {
    input: R,
    output: W,
    params: SimParams,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, params: SimParams) -> Self {
        Self {
            input,
            output,
            params,
        }
    }

    /// Show the main menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(line) = self.prompt()? else {
                writeln!(self.output)?;
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Demo(kind)) => {
                    commands::demo::simulate(kind, &self.params, &mut self.output)?;
                }
                Some(MenuChoice::RateMonotonic) => {
                    if !self.run_submenu(Submenu::RateMonotonic)? {
                        break;
                    }
                }
                Some(MenuChoice::RoundRobin) => {
                    if !self.run_submenu(Submenu::RoundRobin)? {
                        break;
                    }
                }
                Some(MenuChoice::ColorKey) => {
                    ConsoleRenderer::new(&mut self.output, self.params.color).write_color_key()?;
                }
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting Program.")?;
                    return Ok(());
                }
                None => {
                    writeln!(self.output, "Invalid input. Please enter a valid option.")?;
                }
            }
        }
        Ok(())
    }

    /// Returns `false` if input ended before a preset was chosen
    fn run_submenu(&mut self, submenu: Submenu) -> Result<bool> {
        loop {
            submenu.print(&mut self.output)?;
            let Some(line) = self.prompt()? else {
                return Ok(false);
            };

            match submenu.parse(&line) {
                Some(preset) => {
                    debug!(%preset, "menu selection");
                    commands::run::simulate(preset, &self.params, &mut self.output)?;
                    return Ok(true);
                }
                None => writeln!(self.output, "{}", submenu.invalid_message())?,
            }
        }
    }

    fn print_main_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Select a scheduler to run:")?;
        writeln!(self.output, "S - Stack")?;
        writeln!(self.output, "Q - Queue")?;
        writeln!(self.output, "1 - Rate Monotonic")?;
        writeln!(self.output, "2 - Round Robin")?;
        writeln!(self.output, "K - Print Color Key")?;
        writeln!(self.output, "E - Exit")?;
        Ok(())
    }

    /// Next line of input; `None` at end of input
    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[derive(Debug, Clone, Copy)]
enum Submenu {
    RateMonotonic,
    RoundRobin,
}

impl Submenu {
    fn print<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            Submenu::RateMonotonic => {
                writeln!(out, "Select a Rate Monotonic example to run:")?;
                writeln!(out, "1 - Structured")?;
                writeln!(out, "2 - Starved")
            }
            Submenu::RoundRobin => {
                writeln!(out, "Select a Round Robin example to run:")?;
                writeln!(out, "1 - Structured")?;
                writeln!(out, "2 - Starved")?;
                writeln!(out, "3 - Structured (time-sliced)")?;
                writeln!(out, "4 - Starved (time-sliced)")
            }
        }
    }

    fn parse(&self, input: &str) -> Option<Preset> {
        match self {
            Submenu::RateMonotonic => parse_rate_monotonic(input),
            Submenu::RoundRobin => parse_round_robin(input),
        }
    }

    fn invalid_message(&self) -> &'static str {
        match self {
            Submenu::RateMonotonic => {
                "Invalid input. Please enter '1' for Structured or '2' for Starved."
            }
            Submenu::RoundRobin => "Invalid input. Please enter a number from 1 to 4.",
        }
    }
}
