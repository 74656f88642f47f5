//! Geographic types.
//!
//! - [`Coordinate`] - Validated latitude/longitude pair
//! - [`MapRegion`] - Coordinate plus zoom spans, as handed to a map widget
//! - [`LocationKey`] - Hashable coordinate rounded to a fixed precision

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default zoom span used for a freshly acquired position.
pub const DEFAULT_DELTA: f64 = 0.01;

/// Fixed-point scale for [`LocationKey`] (6 decimal places).
const KEY_SCALE: f64 = 1_000_000.0;

// ============================================================================
// Coordinate
// ============================================================================

/// A point on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either component is not
    /// finite or lies outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let coordinate = Self::new_unchecked(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Creates a coordinate without validation.
    ///
    /// Intended for constants; call [`Coordinate::is_valid`] before trusting
    /// values built this way from external input.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns the rounded key used to detect repeated fixes.
    pub fn key(&self) -> LocationKey {
        LocationKey::from(*self)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

// ============================================================================
// Map Region
// ============================================================================

/// A coordinate together with the zoom spans of the visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Center of the region.
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Latitude span in degrees.
    pub latitude_delta: f64,
    /// Longitude span in degrees.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Creates a region with the default zoom spans.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    /// Returns a copy of this region with different zoom spans.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDelta`] unless both spans are positive
    /// and finite.
    pub fn with_deltas(self, latitude_delta: f64, longitude_delta: f64) -> Result<Self, CoreError> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !valid(latitude_delta) || !valid(longitude_delta) {
            return Err(CoreError::InvalidDelta {
                latitude_delta,
                longitude_delta,
            });
        }
        Ok(Self {
            latitude_delta,
            longitude_delta,
            ..self
        })
    }
}

// ============================================================================
// Location Key
// ============================================================================

/// A coordinate rounded to 6 decimal places (about 11 cm).
///
/// Two fixes with the same key are treated as the same place by the
/// duplicate-fetch guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    lat_e6: i64,
    lon_e6: i64,
}

impl LocationKey {
    /// Returns the rounded coordinate this key represents.
    #[allow(clippy::cast_precision_loss)]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat_e6 as f64 / KEY_SCALE, self.lon_e6 as f64 / KEY_SCALE)
    }
}

impl From<Coordinate> for LocationKey {
    #[allow(clippy::cast_possible_truncation)]
    fn from(c: Coordinate) -> Self {
        Self {
            lat_e6: (c.latitude * KEY_SCALE).round() as i64,
            lon_e6: (c.longitude * KEY_SCALE).round() as i64,
        }
    }
}
