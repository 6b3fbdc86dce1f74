use crate::render::ConsoleRenderer;
use anyhow::{Context, Result};
use cadence_core::scheduling::{NullObserver, Preset, RunSummary};
use cadence_core::SimParams;
use colored::*;
use std::io::{self, Write};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip the per-unit trace and print only the totals
    pub summary_only: bool,
    /// Print the totals as JSON instead of text
    pub json: bool,
}

/// Run `preset` for `params.horizon` units, drawing every unit to `out`
pub fn simulate<W: Write>(preset: Preset, params: &SimParams, out: W) -> Result<RunSummary> {
    let mut scheduler = preset
        .build(params)
        .with_context(|| format!("Failed to build {}", preset))?;

    let mut renderer = ConsoleRenderer::new(out, params.color);
    let summary = scheduler.run_for(params.horizon, &mut renderer);
    renderer.write_run_summary(&summary)?;
    renderer.finish().context("Failed to write run output")?;
    Ok(summary)
}

/// `cadence run`
pub fn execute_run(preset: Preset, params: &SimParams, options: RunOptions) -> Result<()> {
    info!(%preset, horizon = params.horizon, "starting run");
    let stdout = io::stdout();

    if !options.json && !options.summary_only {
        simulate(preset, params, stdout.lock())?;
        return Ok(());
    }

    let mut scheduler = preset
        .build(params)
        .with_context(|| format!("Failed to build {}", preset))?;
    let summary = scheduler.run_for(params.horizon, &mut NullObserver);

    if options.json {
        let json = summary.to_json().context("Failed to serialize run summary")?;
        writeln!(stdout.lock(), "{}", json)?;
        return Ok(());
    }

    println!(
        "{} {} for {} units",
        "→".cyan(),
        preset.to_string().yellow(),
        summary.units
    );
    println!("  {}", preset.description().dimmed());
    let mut renderer = ConsoleRenderer::new(stdout.lock(), params.color);
    renderer.write_run_summary(&summary)?;
    renderer.finish()?;
    Ok(())
}
