//! Timetable CLI.
//!
//! Solves a term read from a JSON snapshot and writes the placed lessons.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use timetable::{assemble, extract, SchedulingInput, SolveOutcome, SolverBuilder, SolverConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "solver.toml";

#[derive(Parser)]
#[command(name = "timetable-cli")]
#[command(about = "Weekly lesson timetabling for a school term")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a term and write its lessons as JSON.
    Solve {
        /// Scheduling input (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Solver configuration (TOML or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file for lesson records; stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overrides the configured time limit
        #[arg(long)]
        seconds: Option<u64>,
        /// Overrides the configured random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check that a term can be assembled without solving it.
    Check {
        /// Scheduling input (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Lets lessons go without a room when none suits them
        #[arg(long)]
        allow_unresourced: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    match path {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("loading solver config {}", path.display())),
        None => Ok(SolverConfig::load(DEFAULT_CONFIG_PATH).unwrap_or_default()),
    }
}

fn load_input(path: &Path) -> Result<SchedulingInput> {
    SchedulingInput::from_json_file(path)
        .with_context(|| format!("reading scheduling input {}", path.display()))
}

fn solve(
    input: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    seconds: Option<u64>,
    seed: Option<u64>,
) -> Result<()> {
    let input = load_input(input)?;
    let mut config = load_config(config)?;
    if let Some(seconds) = seconds {
        config = config.with_termination_seconds(seconds);
    }
    if let Some(seed) = seed {
        config = config.with_random_seed(seed);
    }

    let timetable = assemble(&input, config.allow_unresourced)?;
    let result = SolverBuilder::from_config(&config)?.build().solve(timetable)?;

    for constraint in result.constraint_breakdown.iter().filter(|c| c.match_count > 0) {
        info!(
            event = "constraint",
            name = %constraint.name,
            score = %constraint.score,
            matches = constraint.match_count,
        );
    }
    eprintln!(
        "Score: {} ({})",
        result.score,
        match result.outcome {
            SolveOutcome::Feasible => "feasible",
            SolveOutcome::Infeasible => "infeasible",
            SolveOutcome::TimedOut => "timed out before a feasible timetable was found",
        }
    );

    let lessons = extract(&result.solution)?;
    let json = serde_json::to_string_pretty(&lessons)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {} lessons to {}", lessons.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn check(input: &Path, allow_unresourced: bool) -> Result<()> {
    let input = load_input(input)?;
    let timetable = assemble(&input, allow_unresourced)?;
    println!(
        "Term {}: {} lessons, {} teaching slots, {} teachers, {} rooms",
        timetable.term_id,
        timetable.lessons.len(),
        timetable.assignable_slots().len(),
        timetable.teachers.len(),
        timetable.rooms.len(),
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            input,
            config,
            output,
            seconds,
            seed,
        } => solve(
            &input,
            config.as_deref(),
            output.as_deref(),
            seconds,
            seed,
        ),
        Commands::Check {
            input,
            allow_unresourced,
        } => check(&input, allow_unresourced),
    }
}
