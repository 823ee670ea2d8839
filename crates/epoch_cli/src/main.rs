//! Epoch CLI
//!
//! Headless front end for the era showcase:
//! - `epoch run` drives a JSON scenario through the showcase and prints a report
//! - `epoch eras` lists the era table and the loop track size
//! - `epoch init` writes a default `epoch.toml`

mod config;
mod report;
mod runner;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use epoch_showcase::LoopTrack;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Headless runner for the UI eras showcase
#[derive(Parser, Debug)]
#[command(name = "epoch")]
#[command(about = "Run, inspect and configure the UI eras showcase headlessly")]
#[command(version)]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. `debug` or `epoch_showcase=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and print its report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// epoch.toml or a directory containing one
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// List the era table
    Eras {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default epoch.toml
    Init {
        /// Target directory or file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => cmd_run(scenario, config, report),
        Commands::Eras { config, json } => cmd_eras(config, json).map(|_| ExitCode::SUCCESS),
        Commands::Init { path, force } => cmd_init(path, force).map(|_| ExitCode::SUCCESS),
    }
}

fn cmd_run(path: PathBuf, config: Option<PathBuf>, report_path: Option<PathBuf>) -> Result<ExitCode> {
    let config = config::load_or_default(config.as_deref())?;
    let scenario = scenario::Scenario::from_path(&path)?;
    tracing::info!(
        scenario = %path.display(),
        steps = scenario.steps.len(),
        "Running scenario"
    );

    let outcome = runner::run_loaded_scenario(&scenario, &config)
        .with_context(|| format!("Failed to run {}", path.display()))?;
    let report = outcome.report();

    if let Some(report_path) = report_path {
        report
            .write_to_path(&report_path)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
    }
    report.write_to_writer(&mut std::io::stdout().lock())?;

    if outcome.is_failed() {
        tracing::error!(
            step = ?report.failed_step_index,
            message = report.message.as_deref().unwrap_or_default(),
            "Scenario failed"
        );
        return Ok(ExitCode::FAILURE);
    }
    tracing::info!(frames = report.elapsed_frames, ms = report.elapsed_ms, "Scenario passed");
    Ok(ExitCode::SUCCESS)
}

fn cmd_eras(config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = config::load_or_default(config.as_deref())?;
    let eras = config.eras();
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &eras)?;
        writeln!(out)?;
        return Ok(());
    }

    for (index, era) in eras.iter().enumerate() {
        writeln!(
            out,
            "{index:>2}  {:<6} {:<24} {}",
            era.year, era.title, era.style_class
        )?;
    }
    let track = LoopTrack::new(eras.len(), config.timeline.copies)?;
    writeln!(
        out,
        "\n{} eras x {} copies = {} cards",
        track.record_count(),
        track.copies(),
        track.len()
    )?;
    Ok(())
}

fn cmd_init(path: PathBuf, force: bool) -> Result<()> {
    let written = config::write_default(&path, force)?;
    tracing::info!("Wrote {}", written.display());
    Ok(())
}
