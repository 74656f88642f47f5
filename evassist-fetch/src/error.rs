//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Network Error
// ============================================================================

/// Outcome of a failed network call.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// No response arrived within the deadline; the call was aborted.
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Transport failure (DNS, TLS, connection refused or reset).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx response.
    #[error("HTTP {status}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl NetworkError {
    /// Returns true if the same request might succeed when retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::InvalidRequest(_) => false,
        }
    }

    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            NetworkError::InvalidRequest(err.to_string())
        } else {
            NetworkError::Connection(err.to_string())
        }
    }
}

// ============================================================================
// Fetch Error
// ============================================================================

/// Error type for endpoint clients.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The network call failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The backend rejected the request.
    #[error("{message} (HTTP {status})")]
    Api {
        /// Response status code.
        status: u16,
        /// Human-readable message taken from the body or derived from the status.
        message: String,
    },

    /// Response was well-formed JSON but not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Converts a network error, turning HTTP failures into [`FetchError::Api`].
    ///
    /// `fallback` supplies the message when the body carries none.
    pub fn from_network(err: NetworkError, fallback: fn(u16) -> String) -> Self {
        match err {
            NetworkError::Http { status, body } => FetchError::Api {
                status,
                message: extract_message(&body).unwrap_or_else(|| fallback(status)),
            },
            other => FetchError::Network(other),
        }
    }

    /// Returns true if the caller should offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => !matches!(e, NetworkError::InvalidRequest(_)),
            Self::Api { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::InvalidResponse(_) | Self::Json(_) => false,
        }
    }

    /// Returns a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(NetworkError::Timeout(_)) => {
                "The request timed out. Please try again.".to_string()
            }
            Self::Network(NetworkError::Connection(_)) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            Self::Network(e) => e.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::InvalidResponse(_) | Self::Json(_) => {
                "The server sent an unexpected response.".to_string()
            }
        }
    }
}

/// Pulls a message out of a JSON error body.
///
/// Looks at `responseMessage`, `message` and `detail`, in that order.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["responseMessage", "message", "detail"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(NetworkError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(NetworkError::Connection("reset".into()).is_transient());
        assert!(NetworkError::Http { status: 503, body: String::new() }.is_transient());
        assert!(NetworkError::Http { status: 429, body: String::new() }.is_transient());
        assert!(!NetworkError::Http { status: 404, body: String::new() }.is_transient());
        assert!(!NetworkError::InvalidRequest("bad".into()).is_transient());
    }

    #[test]
    fn test_extract_message_order() {
        assert_eq!(
            extract_message(r#"{"message": "b", "responseMessage": "a"}"#).as_deref(),
            Some("a")
        );
        assert_eq!(extract_message(r#"{"detail": "c"}"#).as_deref(), Some("c"));
        assert_eq!(extract_message(r#"{"message": "  ", "detail": "d"}"#).as_deref(), Some("d"));
        assert_eq!(extract_message(r#"{"other": 1}"#), None);
        assert_eq!(extract_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_from_network_uses_fallback() {
        let err = FetchError::from_network(
            NetworkError::Http { status: 404, body: "{}".into() },
            |s| format!("status {s}"),
        );
        assert_eq!(err.user_message(), "status 404");
        assert!(!err.is_retryable());

        let err = FetchError::from_network(
            NetworkError::Http { status: 500, body: r#"{"detail": "db down"}"#.into() },
            |s| format!("status {s}"),
        );
        assert_eq!(err.user_message(), "db down");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_network_errors_are_retryable() {
        let err = FetchError::from(NetworkError::Timeout(Duration::from_secs(10)));
        assert!(err.is_retryable());
        assert!(err.user_message().contains("timed out"));
    }
}
