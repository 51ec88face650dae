#![warn(missing_docs)]
//! Benchseq CLI Library
//!
//! This module provides the CLI infrastructure for benchmark binaries.
//! Call `benchseq::run()` (or `benchseq_cli::run()`) from your binary's
//! `main` to parse arguments, discover configuration, and run the
//! registered suites.
//!
//! # Example
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = benchseq::run() {
//!         eprintln!("Error: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod planner;

pub use config::*;

use benchseq_core::{ExecMode, Harness, PlanKind, RunSettings, SuiteDef, registered_suites};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::time::Duration;

/// Benchseq CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchseq")]
#[command(author, version, about = "Benchseq - sequential benchmark scheduling over criterion")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter suites by regex pattern on suite name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Warm-up time in seconds (overrides benchseq.toml)
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Measurement time in seconds (overrides benchseq.toml)
    #[arg(long)]
    pub measurement: Option<u64>,

    /// Samples per case (overrides benchseq.toml)
    #[arg(long, short = 'n')]
    pub sample_size: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered suites and their declaration plans
    List,
    /// Run suites (default)
    Run,
}

/// Run the Benchseq CLI with arguments from the environment.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or the first scheduling or engine error.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Benchseq CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("benchseq=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("benchseq=info")
            .init();
    }

    // Discover benchseq.toml configuration (CLI flags override)
    let config = SeqConfig::discover().unwrap_or_default();
    let settings = build_run_settings(&cli, &config);

    match cli.command {
        Some(Commands::List) => list_suites(&cli),
        Some(Commands::Run) | None => run_suites(&cli, settings),
    }
}

/// Filter registered suites using the planner module.
///
/// Returns suites sorted alphabetically by name for deterministic runs.
fn filter_suites(cli: &Cli) -> Vec<&'static SuiteDef> {
    let filter_re = Regex::new(&cli.filter).ok();
    let plan = planner::build_plan(registered_suites(), filter_re.as_ref());
    plan.suites
}

/// Build run settings by layering: benchseq.toml values, then CLI overrides.
fn build_run_settings(cli: &Cli, config: &SeqConfig) -> RunSettings {
    let defaults = RunSettings::default();

    // Config file values; malformed durations fall back to the defaults
    let config_warmup =
        SeqConfig::parse_duration(&config.runner.warmup_time).unwrap_or(defaults.warm_up_time);
    let config_measurement = SeqConfig::parse_duration(&config.runner.measurement_time)
        .unwrap_or(defaults.measurement_time);

    RunSettings {
        warm_up_time: cli.warmup.map(Duration::from_secs).unwrap_or(config_warmup),
        measurement_time: cli
            .measurement
            .map(Duration::from_secs)
            .unwrap_or(config_measurement),
        sample_size: cli
            .sample_size
            .or(config.runner.sample_size)
            .unwrap_or(defaults.sample_size),
    }
}

fn list_suites(cli: &Cli) -> anyhow::Result<()> {
    println!("Benchseq Plan:");

    let suites = filter_suites(cli);
    let mut total_cases = 0;
    for def in &suites {
        println!("├── suite: {}", def.name);

        // Declaration only enqueues, so registering into a scratch harness
        // is a safe dry run.
        let mut scratch = Harness::new();
        (def.register)(&mut scratch);

        for entry in scratch.plan() {
            let marker = match entry.kind {
                PlanKind::Group => "group:",
                PlanKind::Compare => "compare:",
                PlanKind::Case {
                    mode: ExecMode::Sync,
                } => "bench:",
                PlanKind::Case {
                    mode: ExecMode::Async,
                } => "bench (async):",
            };
            let indent = "    ".repeat(entry.depth);
            println!("│   {indent}├── {marker} {}", entry.name);
            if matches!(entry.kind, PlanKind::Case { .. }) {
                total_cases += 1;
            }
        }
    }

    println!("{total_cases} cases found.");
    Ok(())
}

fn run_suites(cli: &Cli, settings: RunSettings) -> anyhow::Result<()> {
    let suites = filter_suites(cli);

    if suites.is_empty() {
        println!("No benchmark suites found.");
        return Ok(());
    }

    println!("Running {} suite(s)...", suites.len());

    let mut harness = Harness::new();
    harness.load(suites);
    harness.run(settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_from(args: &[&str]) -> Cli {
        let argv = std::iter::once("benchseq").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_when_no_flags_or_config() {
        let cli = cli_from(&[]);
        assert_eq!(cli.filter, ".*");

        let settings = build_run_settings(&cli, &SeqConfig::default());
        assert_eq!(settings, RunSettings::default());
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = cli_from(&["--warmup", "1", "--measurement", "2", "-n", "30"]);
        let config: SeqConfig = toml::from_str(
            r#"
            [runner]
            warmup_time = "9s"
            measurement_time = "9s"
            sample_size = 99
        "#,
        )
        .unwrap();

        let settings = build_run_settings(&cli, &config);
        assert_eq!(settings.warm_up_time, Duration::from_secs(1));
        assert_eq!(settings.measurement_time, Duration::from_secs(2));
        assert_eq!(settings.sample_size, 30);
    }

    #[test]
    fn test_config_applies_when_flags_absent() {
        let cli = cli_from(&[]);
        let config: SeqConfig = toml::from_str(
            r#"
            [runner]
            warmup_time = "250ms"
            sample_size = 40
        "#,
        )
        .unwrap();

        let settings = build_run_settings(&cli, &config);
        assert_eq!(settings.warm_up_time, Duration::from_millis(250));
        // Unset in both places: engine default
        assert_eq!(settings.measurement_time, Duration::from_secs(5));
        assert_eq!(settings.sample_size, 40);
    }

    #[test]
    fn test_malformed_config_durations_fall_back() {
        let cli = cli_from(&[]);
        let config: SeqConfig = toml::from_str(
            r#"
            [runner]
            warmup_time = "soon"
        "#,
        )
        .unwrap();

        let settings = build_run_settings(&cli, &config);
        assert_eq!(settings.warm_up_time, Duration::from_secs(3));
    }

    #[test]
    fn test_absorbs_cargo_bench_flag() {
        let cli = cli_from(&["--bench", "crypto"]);
        assert!(cli.bench);
        assert_eq!(cli.filter, "crypto");
    }
}
