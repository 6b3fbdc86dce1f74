use crate::render::ConsoleRenderer;
use anyhow::{Context, Result};
use cadence_core::scheduling::{ContainerDemo, ContainerKind, DemoSummary, NullObserver};
use cadence_core::SimParams;
use std::io::{self, Write};
use tracing::info;

/// Run a container demo for `params.demo_units` units, printing the
/// container after every unit
pub fn simulate<W: Write>(kind: ContainerKind, params: &SimParams, out: W) -> Result<DemoSummary> {
    let mut demo = ContainerDemo::new(kind, params.demo_seed);
    let mut renderer = ConsoleRenderer::new(out, params.color);
    let summary = demo.run_for(params.demo_units, &mut renderer);
    renderer.write_demo_summary(&summary)?;
    renderer.finish().context("Failed to write demo output")?;
    Ok(summary)
}

/// `cadence demo`
pub fn execute_demo(kind: ContainerKind, params: &SimParams, json: bool) -> Result<()> {
    info!(%kind, units = params.demo_units, seed = ?params.demo_seed, "starting demo");

    if json {
        let mut demo = ContainerDemo::new(kind, params.demo_seed);
        let summary = demo.run_for(params.demo_units, &mut NullObserver);
        let json = summary.to_json().context("Failed to serialize demo summary")?;
        writeln!(io::stdout().lock(), "{}", json)?;
        return Ok(());
    }

    simulate(kind, params, io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_demo_output() {
        let params = SimParams {
            demo_units: 50,
            demo_seed: Some(11),
            color: false,
            ..SimParams::default()
        };

        let mut out = Vec::new();
        let summary = simulate(ContainerKind::Stack, &params, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let unit_lines = text.lines().filter(|l| l.starts_with('|')).count();
        assert_eq!(unit_lines, 50);
        assert!(text.contains(&format!("Tasks completed: {}", summary.completed)));
        assert!(text.contains(&format!("Tasks left in stack: {}", summary.remaining)));
    }
}
