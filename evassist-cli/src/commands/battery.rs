//! Battery command - request and show predictions.

use anyhow::Result;
use clap::{Args, Subcommand};
use evassist_store::{BatteryService, NO_PREDICTION_MESSAGE};

use crate::output::{BatteryOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

use super::{fetch_context, load_config, prediction_cache, system_clock};

/// Arguments for the battery command.
#[derive(Args)]
pub struct BatteryArgs {
    #[command(subcommand)]
    pub action: BatteryAction,
}

/// Battery subcommands.
#[derive(Subcommand)]
pub enum BatteryAction {
    /// Request a new prediction and cache it.
    Predict {
        /// EV model, e.g. "Tesla Model 3".
        model: String,

        /// Charging session length in minutes.
        #[arg(long, short)]
        duration: u32,
    },

    /// Show the cached prediction.
    Status,
}

/// Runs the battery command.
pub async fn run(args: &BatteryArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;
    let clock = system_clock();
    let ctx = fetch_context(&config)?;
    let service = BatteryService::new(
        ctx.prediction_client(),
        prediction_cache(&config, clock.clone()),
        clock,
    );

    if let BatteryAction::Predict { model, duration } = &args.action {
        service.predict(model, *duration).await?;
    }

    let status = service.status().await;
    match cli.format {
        OutputFormat::Text => match &status {
            Some(status) => {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_battery(status));
            }
            None => println!("{NO_PREDICTION_MESSAGE}"),
        },
        OutputFormat::Json => {
            let output = BatteryOutput::from(status.as_ref());
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
