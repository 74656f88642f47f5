//! The raw I/O seam.
//!
//! [`Transport`] is the only place a request leaves the process. Everything
//! above it goes through [`NetworkCall`](crate::NetworkCall), which owns
//! timeouts and retries.

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::request::{HttpRequest, HttpResponse};

/// Sends a single request and returns whatever the server answered.
///
/// Implementations return non-2xx responses as `Ok`; status handling and
/// deadlines belong to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` once.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError>;
}
