//! Locate command - show the current position.

use anyhow::Result;
use clap::Args;

use crate::output::{JsonFormatter, PositionOutput, TextFormatter};
use crate::{Cli, OutputFormat};

use super::{acquirer, load_config};

/// Arguments for the locate command.
#[derive(Args, Default)]
pub struct LocateArgs {
    /// Latitude span of the reported region.
    #[arg(long, requires = "lon_delta")]
    pub lat_delta: Option<f64>,

    /// Longitude span of the reported region.
    #[arg(long, requires = "lat_delta")]
    pub lon_delta: Option<f64>,

    /// Fail instead of falling back to the default location.
    #[arg(long)]
    pub strict: bool,
}

/// Runs the locate command.
pub async fn run(args: &LocateArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;
    let acquirer = acquirer(&config);

    let output = match (args.lat_delta, args.lon_delta) {
        (Some(lat), Some(lon)) => PositionOutput::device(acquirer.get_with_delta(lat, lon).await?),
        _ if args.strict => PositionOutput::device(acquirer.acquire(None).await?),
        _ => PositionOutput::from(&acquirer.acquire_or_default().await),
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_position(&output));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
