//! Core error types for `EVAssist`.

use thiserror::Error;

/// Core error type for `EVAssist` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Coordinate outside the valid latitude/longitude range or not finite.
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },

    /// Map region zoom span that is not a positive finite number.
    #[error("Invalid map delta: ({latitude_delta}, {longitude_delta})")]
    InvalidDelta {
        /// Offending latitude span.
        latitude_delta: f64,
        /// Offending longitude span.
        longitude_delta: f64,
    },

    /// Invalid data from API response or storage.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
