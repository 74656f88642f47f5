//! Location error types.

use std::time::Duration;

use evassist_core::CoreError;
use thiserror::Error;

/// Why a position could not be acquired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The user has not granted location access.
    #[error("Location permission denied")]
    PermissionDenied {
        /// Whether asking again may still succeed.
        retryable: bool,
    },

    /// Location services are switched off on the device.
    #[error("Location services are disabled")]
    ServicesDisabled,

    /// No position could be determined.
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived within the deadline.
    #[error("Location request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The platform failed in an unexpected way.
    #[error("Location error: {0}")]
    Unknown(String),

    /// A requested zoom span was not a positive finite number.
    #[error("Invalid map delta: ({latitude_delta}, {longitude_delta})")]
    InvalidDelta {
        /// Requested latitude span.
        latitude_delta: f64,
        /// Requested longitude span.
        longitude_delta: f64,
    },
}

impl LocationError {
    /// Returns true if calling again, possibly after user action, may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::PermissionDenied { retryable } => *retryable,
            Self::ServicesDisabled | Self::Unavailable(_) | Self::Timeout(_) | Self::Unknown(_) => {
                true
            }
            Self::InvalidDelta { .. } => false,
        }
    }

    /// Returns a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied { retryable: true } => {
                "Location permission is required to find nearby mechanics.".to_string()
            }
            Self::PermissionDenied { retryable: false } => {
                "Location permission was denied. Enable it in your device settings.".to_string()
            }
            Self::ServicesDisabled => {
                "Location services are turned off. Please enable them.".to_string()
            }
            Self::Unavailable(_) | Self::Unknown(_) => {
                "Unable to determine your current location.".to_string()
            }
            Self::Timeout(_) => "Getting your location took too long. Please try again.".to_string(),
            Self::InvalidDelta { .. } => self.to_string(),
        }
    }
}

impl From<CoreError> for LocationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDelta {
                latitude_delta,
                longitude_delta,
            } => Self::InvalidDelta {
                latitude_delta,
                longitude_delta,
            },
            CoreError::InvalidCoordinate { .. } => Self::Unavailable(err.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }
}
