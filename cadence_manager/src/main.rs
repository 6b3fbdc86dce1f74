use anyhow::Result;
use cadence_core::scheduling::{ContainerKind, DisciplineKind, Preset, Workload};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cadence_manager::commands::run::RunOptions;
use cadence_manager::config::{self, Overrides};
use cadence_manager::{commands, menu, render, version};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence - discrete-time scheduling simulator")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Params file (default: .cadence/params.yaml when present)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frame length shown in the trace
    #[arg(long = "frame", global = true, value_name = "UNITS")]
    frame_length: Option<u64>,

    /// Disable ANSI colors
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu,

    /// Run a scheduling discipline over a built-in workload
    Run {
        /// rate-monotonic, round-robin or time-sliced
        discipline: DisciplineKind,

        /// structured or starved
        #[arg(short = 'p', long = "preset", default_value = "structured")]
        preset: Workload,

        /// Units to simulate
        #[arg(short = 'u', long = "units")]
        units: Option<u64>,

        /// Time slice for the time-sliced discipline
        #[arg(short = 'q', long = "quantum")]
        quantum: Option<u32>,

        /// Only print the totals
        #[arg(short = 's', long = "summary-only")]
        summary_only: bool,

        /// Print the totals as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Service a lone stack or queue of random tasks
    Demo {
        /// stack or queue
        container: ContainerKind,

        /// Units to simulate
        #[arg(short = 'u', long = "units")]
        units: Option<u64>,

        /// Seed for reproducible runs
        #[arg(long = "seed")]
        seed: Option<u64>,

        /// Print the totals as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Print the color key
    Key,

    /// Generate shell completion scripts
    #[command(hide = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version information
    Version,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let mut overrides = Overrides {
        params_file: cli.config,
        frame_length: cli.frame_length,
        no_color: cli.no_color,
        ..Overrides::default()
    };

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let params = config::load_params(&overrides)?;
            apply_color(params.color);
            let stdin = io::stdin();
            let mut menu = menu::Menu::new(stdin.lock(), io::stdout(), params);
            menu.run()
        }

        Commands::Run {
            discipline,
            preset,
            units,
            quantum,
            summary_only,
            json,
        } => {
            overrides.horizon = units;
            overrides.quantum_limit = quantum;
            let params = config::load_params(&overrides)?;
            apply_color(params.color);

            commands::run::execute_run(
                Preset::new(discipline, preset),
                &params,
                RunOptions { summary_only, json },
            )
        }

        Commands::Demo {
            container,
            units,
            seed,
            json,
        } => {
            overrides.demo_units = units;
            overrides.demo_seed = seed;
            let params = config::load_params(&overrides)?;
            apply_color(params.color);

            commands::demo::execute_demo(container, &params, json)
        }

        Commands::Key => {
            let params = config::load_params(&overrides)?;
            apply_color(params.color);
            let mut renderer = render::ConsoleRenderer::new(io::stdout(), params.color);
            renderer.write_color_key()?;
            renderer.finish()?;
            Ok(())
        }

        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }

        Commands::Version => {
            version::print_version_info();
            Ok(())
        }
    }
}

fn apply_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
