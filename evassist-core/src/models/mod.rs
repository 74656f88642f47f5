//! Domain models for EVAssist.
//!
//! ## Submodules
//!
//! - [`geo`] - Coordinates, map regions and rounded location keys
//! - [`provider`] - Mechanics and result pages from the discovery endpoint
//! - [`permission`] - Location permission states
//! - [`battery`] - Battery predictions, cache entries and the status view

mod battery;
mod geo;
mod permission;
mod provider;

// Re-export everything at the models level
pub use battery::{BatteryStatus, PredictionCacheEntry, PredictionResult, VehicleInfo};
pub use geo::{Coordinate, LocationKey, MapRegion, DEFAULT_DELTA};
pub use permission::PermissionState;
pub use provider::{Provider, ProviderPage};

#[cfg(test)]
mod serde_tests;
