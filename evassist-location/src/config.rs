//! Location settings.

use std::time::Duration;

use evassist_core::{Coordinate, DEFAULT_DELTA, MapRegion};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::platform::{Accuracy, FixOptions};

/// San Francisco, used when no position can be acquired.
pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new_unchecked(37.7749, -122.4194);

/// Settings for [`LocationAcquirer`](crate::LocationAcquirer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Position reported in degraded mode.
    pub fallback: Coordinate,
    /// Latitude span of acquired regions.
    pub latitude_delta: f64,
    /// Longitude span of acquired regions.
    pub longitude_delta: f64,
    /// Requested accuracy.
    pub accuracy: Accuracy,
    /// Deadline for a fix, in seconds.
    pub fix_timeout_secs: u64,
    /// Oldest cached fix accepted, in seconds.
    pub max_age_secs: u64,
    /// Fixed device position for hosts without location hardware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_position: Option<Coordinate>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
            accuracy: Accuracy::Balanced,
            fix_timeout_secs: 10,
            max_age_secs: 10,
            device_position: None,
        }
    }
}

impl LocationConfig {
    /// Returns the fix options these settings describe.
    pub fn fix_options(&self) -> FixOptions {
        FixOptions {
            accuracy: self.accuracy,
            max_age: Duration::from_secs(self.max_age_secs),
            timeout: Duration::from_secs(self.fix_timeout_secs.max(1)),
        }
    }

    /// Wraps `coordinate` in a region with the configured spans.
    ///
    /// Invalid spans fall back to the defaults.
    pub fn region_at(&self, coordinate: Coordinate) -> MapRegion {
        MapRegion::new(coordinate)
            .with_deltas(self.latitude_delta, self.longitude_delta)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring configured map deltas");
                MapRegion::new(coordinate)
            })
    }

    /// Returns the fallback region, never `(0, 0)` and never invalid.
    pub fn fallback_region(&self) -> MapRegion {
        let usable = self.fallback.is_valid()
            && !(self.fallback.latitude == 0.0 && self.fallback.longitude == 0.0);
        if usable {
            self.region_at(self.fallback)
        } else {
            warn!(fallback = %self.fallback, "Configured fallback unusable, using default");
            self.region_at(DEFAULT_FALLBACK)
        }
    }
}
