//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use evassist_store::{Config, default_config_dir, default_storage_path};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

use super::load_config;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("EVAssist Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Backend:          {}", config.api.base_url);
            println!("Page size:        {}", config.api.page_size);
            println!("Timeout:          {}s", config.api.timeout_secs);
            println!(
                "Retries:          {} attempts, {}ms apart",
                config.api.max_attempts, config.api.retry_delay_ms
            );
            println!();
            println!("Fallback:         {}", config.location.fallback);
            match config.location.device_position {
                Some(p) => println!("Device position:  {p}"),
                None => println!("Device position:  (none)"),
            }
            println!();
            println!("Prediction TTL:   {}h", config.cache.ttl_hours);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let storage_path = default_storage_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:   {}", config_dir.display());
            println!("Config file:  {}", config_path.display());
            println!("Storage file: {}", storage_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_path.display().to_string(),
                "storage_file": storage_path.display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);

    if !force && tokio::fs::try_exists(&path).await? {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path).await?;
    info!(path = %path.display(), "Configuration initialized");
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}
