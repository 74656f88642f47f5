//! Nearby command - list mechanics around a position.

use anyhow::{Context, Result};
use clap::Args;
use evassist_core::Coordinate;
use evassist_store::MechanicPager;
use tracing::warn;

use crate::output::{JsonFormatter, NearbyOutput, TextFormatter};
use crate::{Cli, OutputFormat};

use super::{acquirer, fetch_context, load_config};

/// Arguments for the nearby command.
#[derive(Args)]
pub struct NearbyArgs {
    /// Search latitude (defaults to the current position).
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Search longitude (defaults to the current position).
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Page to fetch.
    #[arg(long, short, default_value_t = 1)]
    pub page: u32,

    /// Keep loading until the last page.
    #[arg(long, short, conflicts_with = "page")]
    pub all: bool,
}

/// Runs the nearby command.
pub async fn run(args: &NearbyArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    let (origin, degraded) = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => (
            Coordinate::new(lat, lon).context("Invalid --lat/--lon")?,
            false,
        ),
        _ => {
            let position = acquirer(&config).acquire_or_default().await;
            if let Some(e) = &position.error {
                warn!(error = %e, "Searching around the fallback location");
            }
            (position.region.coordinate, position.is_degraded())
        }
    };

    let ctx = fetch_context(&config)?;
    let pager = MechanicPager::new(ctx.nearby_client());

    pager.fetch(origin, args.page).await?;
    if args.all {
        while pager.load_more().await?.is_some() {}
    }

    let snapshot = pager.snapshot().await;
    let rows = pager.providers_with_distance(&origin).await;
    let output = NearbyOutput::new(origin, degraded, &snapshot, &rows);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_nearby(&output));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
