// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # EVAssist Store
//!
//! Client-side state for the EVAssist pipeline.
//!
//! This crate provides:
//!
//! - **MechanicPager**: accumulated nearby-search results with paging,
//!   duplicate-fetch suppression and change notifications
//! - **PredictionCache**: the latest battery prediction with lazy 24h expiry
//! - **BatteryService**: prediction requests plus the cached battery view
//! - **KeyValueStore**: string storage seam with memory and file backends
//! - **Config** and **persistence**: JSON files written atomically
//!
//! ## Usage
//!
//! ```ignore
//! use evassist_store::{Config, MechanicPager};
//! use evassist_fetch::FetchContext;
//!
//! let config = Config::load().await?;
//! let ctx = FetchContext::new(config.api.fetch_settings())?;
//! let pager = MechanicPager::new(ctx.nearby_client());
//!
//! pager.fetch(here, 1).await?;
//! while pager.load_more().await?.is_some() {}
//! ```

pub mod battery_service;
pub mod config;
pub mod error;
pub mod kv;
pub mod mechanic_pager;
pub mod persistence;
pub mod prediction_cache;
pub mod validation;

pub use battery_service::{BatteryService, NO_PREDICTION_MESSAGE};
pub use config::{ApiConfig, CacheConfig, Config};
pub use error::{PagerError, StoreError};
pub use kv::{FileKvStore, KeyValueStore, KvBatch, MemoryKvStore};
pub use mechanic_pager::{MechanicPager, PagerSnapshot};
pub use persistence::{
    default_config_dir, default_config_path, default_data_dir, default_storage_path, ensure_dir,
    load_json, load_json_if_exists, load_json_or_default, save_json,
};
pub use prediction_cache::{
    DEFAULT_TTL_HOURS, PREDICTION_KEY, PredictionCache, TIMESTAMP_KEY, VEHICLE_KEY,
};
pub use validation::{DropReason, Validated, validate_all, validate_mechanic};

#[cfg(test)]
mod persistence_tests;
