// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `EVAssist` Core
//!
//! Core types, models, and traits for the `EVAssist` client.
//!
//! This crate provides the foundational abstractions used across all other
//! `EVAssist` crates, including:
//!
//! - Domain models (coordinates, map regions, mechanics, predictions)
//! - Great-circle distance resolution for mechanics without a server distance
//! - Error types
//! - The [`Clock`] trait so time can be controlled in tests
//!
//! ## Key Types
//!
//! ### Geography
//! - [`Coordinate`] - Validated latitude/longitude pair
//! - [`MapRegion`] - Coordinate plus zoom spans
//! - [`LocationKey`] - Coordinate rounded to 6 decimal places
//!
//! ### Discovery
//! - [`Provider`] - A repair shop returned by the nearby endpoint
//! - [`ProviderPage`] - One page of discovery results
//! - [`PermissionState`] - Location permission status
//!
//! ### Battery
//! - [`PredictionResult`] - Battery prediction returned by the backend
//! - [`VehicleInfo`] - Vehicle metadata captured at prediction time
//! - [`PredictionCacheEntry`] - Persisted prediction with its timestamp
//! - [`BatteryStatus`] - View model for the battery monitoring screen

pub mod distance;
pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Geography
    Coordinate,
    LocationKey,
    MapRegion,
    DEFAULT_DELTA,
    // Discovery
    PermissionState,
    Provider,
    ProviderPage,
    // Battery
    BatteryStatus,
    PredictionCacheEntry,
    PredictionResult,
    VehicleInfo,
};

// Re-export distance helpers
pub use distance::{display_distance, format_distance, haversine, EARTH_RADIUS_KM};

// Re-export traits
pub use traits::{Clock, ManualClock, SystemClock};
