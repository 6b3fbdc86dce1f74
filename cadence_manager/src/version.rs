use colored::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_version_info() {
    println!("{} {}", "cadence".green().bold(), VERSION);
    println!(
        "  {} rate-monotonic, round-robin, time-sliced",
        "Disciplines:".dimmed()
    );
    println!("  {} stack, queue", "Demos:".dimmed());
}
