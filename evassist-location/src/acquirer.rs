//! Device position acquisition.

use std::sync::Arc;

use evassist_core::{Coordinate, MapRegion, PermissionState};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::LocationConfig;
use crate::error::LocationError;
use crate::permission::PermissionStateMachine;
use crate::platform::{FixOptions, LocationPlatform, PlatformFixError};

// ============================================================================
// Position
// ============================================================================

/// Where a [`Position`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSource {
    /// A fresh device fix.
    Device,
    /// The configured fallback.
    Fallback,
}

/// A region plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The region to search around.
    pub region: MapRegion,
    /// Device fix or fallback.
    pub source: PositionSource,
    /// Why the fallback was used.
    pub error: Option<LocationError>,
}

impl Position {
    /// Returns true if this is the fallback region.
    pub fn is_degraded(&self) -> bool {
        self.source == PositionSource::Fallback
    }
}

// ============================================================================
// Location Acquirer
// ============================================================================

/// Produces a validated device position, or says exactly why it can't.
pub struct LocationAcquirer {
    platform: Arc<dyn LocationPlatform>,
    permissions: PermissionStateMachine,
    config: LocationConfig,
}

impl LocationAcquirer {
    /// Creates an acquirer over `platform`.
    pub fn new(platform: Arc<dyn LocationPlatform>, config: LocationConfig) -> Self {
        Self {
            permissions: PermissionStateMachine::new(platform.clone()),
            platform,
            config,
        }
    }

    /// Returns the permission state machine.
    pub fn permissions(&self) -> &PermissionStateMachine {
        &self.permissions
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    /// Acquires the current position.
    ///
    /// Prompts for permission if needed, then requests one fix with
    /// `options` (the configured options when `None`). The fix timeout is
    /// enforced here regardless of what the platform does.
    ///
    /// # Errors
    ///
    /// - [`LocationError::PermissionDenied`] when access is not granted
    /// - [`LocationError::ServicesDisabled`] when location services are off
    /// - [`LocationError::Timeout`] when no fix arrives in time
    /// - [`LocationError::Unavailable`] when the fix is missing or invalid
    /// - [`LocationError::Unknown`] for other platform failures
    #[instrument(skip(self))]
    pub async fn acquire(&self, options: Option<FixOptions>) -> Result<MapRegion, LocationError> {
        let mut state = self.permissions.check().await;
        if !state.is_granted() {
            state = self.permissions.request().await;
        }
        if !state.is_granted() {
            return Err(LocationError::PermissionDenied {
                retryable: state == PermissionState::DeniedRetryable,
            });
        }

        if !self.platform.services_enabled().await {
            return Err(LocationError::ServicesDisabled);
        }

        let options = options.unwrap_or_else(|| self.config.fix_options());
        let fix = match tokio::time::timeout(options.timeout, self.platform.current_position(&options)).await {
            Ok(Ok(fix)) => fix,
            Ok(Err(PlatformFixError::Unavailable(reason))) => {
                return Err(LocationError::Unavailable(reason));
            }
            Ok(Err(PlatformFixError::Timeout)) | Err(_) => {
                return Err(LocationError::Timeout(options.timeout));
            }
            Ok(Err(PlatformFixError::Other(reason))) => return Err(LocationError::Unknown(reason)),
        };

        let coordinate = Coordinate::new(fix.latitude, fix.longitude)?;
        debug!(%coordinate, accuracy_m = ?fix.accuracy_m, "Acquired position");
        Ok(self.config.region_at(coordinate))
    }

    /// Returns the configured fallback region.
    pub fn default_location(&self) -> MapRegion {
        self.config.fallback_region()
    }

    /// Acquires the current position with custom zoom spans.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidDelta`] for non-positive spans, before
    /// touching the platform; otherwise as [`acquire`](Self::acquire).
    pub async fn get_with_delta(
        &self,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<MapRegion, LocationError> {
        // Validate against the fallback so bad spans fail without a prompt.
        self.default_location()
            .with_deltas(latitude_delta, longitude_delta)?;
        let region = self.acquire(None).await?;
        Ok(region.with_deltas(latitude_delta, longitude_delta)?)
    }

    /// Acquires the current position, falling back to the default region.
    pub async fn acquire_or_default(&self) -> Position {
        match self.acquire(None).await {
            Ok(region) => Position {
                region,
                source: PositionSource::Device,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Using fallback location");
                Position {
                    region: self.default_location(),
                    source: PositionSource::Fallback,
                    error: Some(e),
                }
            }
        }
    }
}

impl std::fmt::Debug for LocationAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationAcquirer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
