// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pcr - Phase cycle tracker CLI

mod commands;
mod error;
mod output;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{artifact, inspect, lifecycle, record, validation};
use error::PcrError;
use output::OutputFormat;
use pcr_core::Phase;
use state::StateFile;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pcr",
    version,
    about = "pcr tracks work through a fixed cycle of phases: PLANNER, MAKER, CHECKER, REFLECTOR, ORCHESTRATOR"
)]
struct Cli {
    /// Tracker state file
    #[arg(long, global = true, env = "PCR_STATE", default_value = "pcr_state.json")]
    state: PathBuf,

    /// Tracker config file (TOML)
    #[arg(long, global = true, env = "PCR_CONFIG")]
    config: Option<PathBuf>,

    /// Write tracker log entries to this JSON-lines file instead of stderr
    #[arg(long, global = true, env = "PCR_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tracker state file
    Init {
        /// Replace an existing state file
        #[arg(long)]
        force: bool,
    },
    /// Show the current phase, phase records and validation flags
    Status {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Move to the given phase (must follow the current one)
    Advance { phase: Phase },
    /// Move to the phase after the current one
    Next,
    /// Mark the current phase as failed
    Fail {
        #[arg(long, default_value = "manual failure")]
        reason: String,
    },
    /// Re-activate a failed phase
    Retry,
    /// Register an artifact with the current phase
    Artifact {
        /// Artifact type (doc, code, test, ...)
        kind: String,
        /// Path or other identifier
        identifier: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List registered artifacts
    Artifacts {
        #[arg(long)]
        phase: Option<Phase>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Set a validation flag
    Flag {
        name: String,
        #[arg(value_enum)]
        verdict: validation::Verdict,
        #[arg(long, default_value = "")]
        details: String,
    },
    /// Verify flags and artifacts; exits non-zero when issues are found
    Check {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Record the current intent and echo it back
    Intent { text: String },
    /// Record a metric sample
    Metric { name: String, value: f64 },
    /// Drop metric samples older than the given age
    Cleanup {
        #[arg(long, default_value_t = 24)]
        max_age_hours: u64,
    },
    /// Summarize progress, compliance and metrics
    Report {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show recent tracker log entries
    Logs {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Include DEBUG entries
        #[arg(long)]
        debug: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Export the full tracker state as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PcrError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PCR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let state = StateFile::open(cli.state, cli.config.as_deref(), cli.log_file)?;

    match cli.command {
        Commands::Init { force } => lifecycle::init(&state, force),
        Commands::Status { format } => inspect::status(&state, format),
        Commands::Advance { phase } => lifecycle::advance(&state, Some(phase)),
        Commands::Next => lifecycle::advance(&state, None),
        Commands::Fail { reason } => lifecycle::fail(&state, reason),
        Commands::Retry => lifecycle::retry(&state),
        Commands::Artifact {
            kind,
            identifier,
            description,
        } => artifact::register(&state, &kind, &identifier, &description),
        Commands::Artifacts {
            phase,
            kind,
            format,
        } => artifact::list(&state, phase, kind, format),
        Commands::Flag {
            name,
            verdict,
            details,
        } => validation::flag(&state, &name, verdict, details),
        Commands::Check { format } => validation::check(&state, format),
        Commands::Intent { text } => record::intent(&state, text),
        Commands::Metric { name, value } => record::metric(&state, &name, value),
        Commands::Cleanup { max_age_hours } => record::cleanup(&state, max_age_hours),
        Commands::Report { format } => inspect::report(&state, format),
        Commands::Logs {
            limit,
            debug,
            format,
        } => inspect::logs(&state, limit, debug, format),
        Commands::Export { output } => inspect::export(&state, output.as_deref()),
    }
}
