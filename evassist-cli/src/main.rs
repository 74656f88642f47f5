// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! EVAssist CLI - find nearby mechanics and check your battery prediction.
//!
//! # Examples
//!
//! ```bash
//! # Where am I (device position or fallback)?
//! evassist locate
//!
//! # Mechanics around the current position
//! evassist nearby
//!
//! # Mechanics around a given point, every page
//! evassist nearby --lat 37.7749 --lon -122.4194 --all
//!
//! # Request and cache a battery prediction
//! evassist battery predict "Tesla Model 3" --duration 45
//!
//! # Show the cached prediction
//! evassist battery status
//!
//! # JSON output
//! evassist nearby --format json --pretty
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use evassist_fetch::FetchError;
use evassist_location::LocationError;
use evassist_store::{PagerError, StoreError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{battery, config, locate, nearby};

// ============================================================================
// CLI Definition
// ============================================================================

/// EVAssist CLI - nearby mechanics and battery predictions.
#[derive(Parser)]
#[command(name = "evassist")]
#[command(about = "Find nearby EV mechanics and monitor battery predictions")]
#[command(long_about = r#"
EVAssist finds repair shops near you and keeps your latest battery
health prediction available offline.

Examples:
  evassist locate                        # Current position
  evassist nearby                        # Mechanics nearby
  evassist nearby --all                  # Every page
  evassist battery predict "Leaf" -d 60  # New prediction
  evassist battery status                # Cached prediction
"#)]
#[command(version)]
#[command(author = "EVAssist Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current position.
    #[command(visible_alias = "l")]
    Locate(locate::LocateArgs),

    /// List mechanics near a position.
    #[command(visible_alias = "n")]
    Nearby(nearby::NearbyArgs),

    /// Battery predictions.
    #[command(visible_alias = "b")]
    Battery(battery::BatteryArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Location permission or hardware problem.
    Location = 2,
    /// Backend unreachable or returned an error.
    Network = 3,
    /// Invalid configuration.
    Config = 4,
}

impl ExitCode {
    /// Picks the exit code for an error.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<LocationError>().is_some() {
            return Self::Location;
        }
        if err.downcast_ref::<FetchError>().is_some() {
            return Self::Network;
        }
        if let Some(e) = err.downcast_ref::<PagerError>() {
            return match e {
                PagerError::Fetch(_) => Self::Network,
                _ => Self::Error,
            };
        }
        if let Some(e) = err.downcast_ref::<StoreError>() {
            return match e {
                StoreError::Fetch(_) => Self::Network,
                StoreError::Config(_) => Self::Config,
                _ => Self::Error,
            };
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("evassist=debug,info")
    } else {
        EnvFilter::new("evassist=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Locate(args) => locate::run(args, &cli).await,
        Commands::Nearby(args) => nearby::run(args, &cli).await,
        Commands::Battery(args) => battery::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {}", commands::describe_error(&e));
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
