// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # EVAssist Location
//!
//! Permission handling and position acquisition.
//!
//! - [`platform::LocationPlatform`] - the device seam
//! - [`permission::PermissionStateMachine`] - when to prompt, and what the
//!   answer means
//! - [`acquirer::LocationAcquirer`] - one validated fix, or a typed reason
//!   why not, plus the configured fallback

pub mod acquirer;
pub mod config;
pub mod error;
pub mod permission;
pub mod platform;

pub use acquirer::{LocationAcquirer, Position, PositionSource};
pub use config::{DEFAULT_FALLBACK, LocationConfig};
pub use error::LocationError;
pub use permission::PermissionStateMachine;
pub use platform::{
    Accuracy, Fix, FixOptions, LocationPlatform, PlatformFixError, PlatformPermission,
    PlatformStatus, StaticPlatform,
};
