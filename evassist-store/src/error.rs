//! Store error types.

use evassist_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend call failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl StoreError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::Fetch(e) => e.is_retryable(),
            StoreError::Serialization(_) | StoreError::Config(_) => false,
        }
    }

    /// Returns a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Fetch(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Errors returned by [`MechanicPager`](crate::MechanicPager).
#[derive(Debug, Error)]
pub enum PagerError {
    /// Another fetch is still running.
    #[error("A mechanic search is already in progress")]
    FetchInProgress,

    /// The search location is not a valid coordinate.
    #[error("Invalid search location: ({latitude}, {longitude})")]
    InvalidLocation {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },

    /// Page numbers start at 1.
    #[error("Invalid page: {0}")]
    InvalidPage(u32),

    /// The backend call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl PagerError {
    /// Returns a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            PagerError::Fetch(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
