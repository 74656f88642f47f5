//! CLI command implementations.

pub mod battery;
pub mod config;
pub mod locate;
pub mod nearby;

use std::sync::Arc;

use anyhow::{Context, Result};
use evassist_core::{Clock, SystemClock};
use evassist_fetch::{FetchContext, FetchError};
use evassist_location::{LocationAcquirer, LocationError, StaticPlatform};
use evassist_store::{
    Config, FileKvStore, PagerError, PredictionCache, StoreError, default_storage_path,
};

use crate::Cli;

/// Loads the configuration named on the command line, or the default one.
pub async fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path).await,
        None => Config::load().await,
    };
    config.context("Failed to load configuration")
}

/// Builds the backend context.
pub fn fetch_context(config: &Config) -> Result<FetchContext> {
    Ok(FetchContext::new(config.api.fetch_settings())?)
}

/// Builds the acquirer.
///
/// A configured `device_position` stands in for location hardware; without
/// one every acquisition ends in degraded mode.
pub fn acquirer(config: &Config) -> LocationAcquirer {
    let platform = match config.location.device_position {
        Some(position) => StaticPlatform::at(position),
        None => StaticPlatform::unavailable(),
    };
    LocationAcquirer::new(Arc::new(platform), config.location.clone())
}

/// Builds the prediction cache over the on-disk store.
pub fn prediction_cache(config: &Config, clock: Arc<dyn Clock>) -> PredictionCache {
    let path = config
        .cache
        .storage_path
        .clone()
        .unwrap_or_else(default_storage_path);
    PredictionCache::new(Arc::new(FileKvStore::new(path)), clock).with_ttl(config.cache.ttl())
}

/// Returns the system clock.
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Renders an error for the terminal, preferring user-facing messages.
pub fn describe_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<FetchError>() {
        return e.user_message();
    }
    if let Some(e) = err.downcast_ref::<PagerError>() {
        return e.user_message();
    }
    if let Some(e) = err.downcast_ref::<StoreError>() {
        return e.user_message();
    }
    if let Some(e) = err.downcast_ref::<LocationError>() {
        return e.user_message();
    }
    format!("{err:#}")
}
