//! The device location platform seam.
//!
//! [`LocationPlatform`] is everything the pipeline needs from the operating
//! system. Production embedders implement it over their native APIs; the
//! CLI and the tests use [`StaticPlatform`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use evassist_core::{Coordinate, PermissionState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Permission
// ============================================================================

/// Permission status as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    /// Access granted.
    Granted,
    /// Access denied by the user.
    Denied,
    /// Access blocked by policy (parental controls, MDM).
    Restricted,
    /// The user has not been asked yet.
    Undetermined,
}

/// A platform permission answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPermission {
    /// Reported status.
    pub status: PlatformStatus,
    /// Whether the platform will show the prompt again.
    pub can_ask_again: bool,
}

impl PlatformPermission {
    /// Creates a permission answer.
    pub const fn new(status: PlatformStatus, can_ask_again: bool) -> Self {
        Self {
            status,
            can_ask_again,
        }
    }

    /// Granted access.
    pub const fn granted() -> Self {
        Self::new(PlatformStatus::Granted, false)
    }

    /// Not asked yet.
    pub const fn undetermined() -> Self {
        Self::new(PlatformStatus::Undetermined, true)
    }

    /// Maps the platform answer onto [`PermissionState`].
    pub fn to_state(self) -> PermissionState {
        match (self.status, self.can_ask_again) {
            (PlatformStatus::Granted, _) => PermissionState::Granted,
            (PlatformStatus::Undetermined, _) => PermissionState::Unknown,
            (PlatformStatus::Denied, true) => PermissionState::DeniedRetryable,
            (PlatformStatus::Denied, false) | (PlatformStatus::Restricted, _) => {
                PermissionState::DeniedPermanent
            }
        }
    }
}

// ============================================================================
// Fix
// ============================================================================

/// Requested positioning accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    /// Coarse, network based.
    Low,
    /// Reasonable accuracy at moderate power.
    #[default]
    Balanced,
    /// Best available, GPS based.
    High,
}

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOptions {
    /// Requested accuracy.
    pub accuracy: Accuracy,
    /// Oldest cached fix the platform may return.
    pub max_age: Duration,
    /// Deadline for the fix.
    pub timeout: Duration,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Balanced,
            max_age: Duration::from_secs(10),
            timeout: Duration::from_secs(10),
        }
    }
}

/// A raw position reading, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, if reported.
    pub accuracy_m: Option<f64>,
}

impl Fix {
    /// Creates a fix without an accuracy estimate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }
}

impl From<Coordinate> for Fix {
    fn from(c: Coordinate) -> Self {
        Self::new(c.latitude, c.longitude)
    }
}

/// Platform failure while resolving a fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformFixError {
    /// No position source could produce a fix.
    #[error("position unavailable: {0}")]
    Unavailable(String),
    /// The platform gave up waiting.
    #[error("position request timed out")]
    Timeout,
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Platform Trait
// ============================================================================

/// Device location services.
#[async_trait]
pub trait LocationPlatform: Send + Sync {
    /// Reads the current permission without prompting.
    async fn permission_status(&self) -> PlatformPermission;

    /// Shows the permission prompt and returns the answer.
    async fn request_permission(&self) -> PlatformPermission;

    /// Returns whether location services are switched on.
    async fn services_enabled(&self) -> bool;

    /// Resolves a single position.
    async fn current_position(&self, options: &FixOptions) -> Result<Fix, PlatformFixError>;
}

// ============================================================================
// Static Platform
// ============================================================================

/// A platform with fixed answers.
///
/// Without a position it reports permission as granted and the fix as
/// unavailable, which drives callers into degraded mode.
#[derive(Debug)]
pub struct StaticPlatform {
    status: PlatformPermission,
    prompt_answer: PlatformPermission,
    services_enabled: bool,
    fix: Result<Fix, PlatformFixError>,
    fix_delay: Duration,
    prompts: AtomicUsize,
    fix_requests: AtomicUsize,
}

impl StaticPlatform {
    /// A granted platform that always reports `fix`.
    pub fn at(fix: impl Into<Fix>) -> Self {
        Self {
            status: PlatformPermission::granted(),
            prompt_answer: PlatformPermission::granted(),
            services_enabled: true,
            fix: Ok(fix.into()),
            fix_delay: Duration::ZERO,
            prompts: AtomicUsize::new(0),
            fix_requests: AtomicUsize::new(0),
        }
    }

    /// A granted platform that cannot produce a fix.
    pub fn unavailable() -> Self {
        Self {
            fix: Err(PlatformFixError::Unavailable("no position configured".to_string())),
            ..Self::at(Fix::new(0.0, 0.0))
        }
    }

    /// Sets the status reported before prompting.
    pub fn with_status(mut self, status: PlatformPermission) -> Self {
        self.status = status;
        self
    }

    /// Sets the answer the prompt returns.
    pub fn with_prompt_answer(mut self, answer: PlatformPermission) -> Self {
        self.prompt_answer = answer;
        self
    }

    /// Switches location services on or off.
    pub fn with_services_enabled(mut self, enabled: bool) -> Self {
        self.services_enabled = enabled;
        self
    }

    /// Makes every fix request fail with `error`.
    pub fn with_fix_error(mut self, error: PlatformFixError) -> Self {
        self.fix = Err(error);
        self
    }

    /// Delays every fix by `delay`.
    pub fn with_fix_delay(mut self, delay: Duration) -> Self {
        self.fix_delay = delay;
        self
    }

    /// Number of prompts shown so far.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Number of fixes requested so far.
    pub fn fix_request_count(&self) -> usize {
        self.fix_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationPlatform for StaticPlatform {
    async fn permission_status(&self) -> PlatformPermission {
        self.status
    }

    async fn request_permission(&self) -> PlatformPermission {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.prompt_answer
    }

    async fn services_enabled(&self) -> bool {
        self.services_enabled
    }

    async fn current_position(&self, _options: &FixOptions) -> Result<Fix, PlatformFixError> {
        self.fix_requests.fetch_add(1, Ordering::SeqCst);
        if !self.fix_delay.is_zero() {
            tokio::time::sleep(self.fix_delay).await;
        }
        self.fix.clone()
    }
}
