//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::NetworkError;
use crate::request::{HttpRequest, HttpResponse, Method};
use crate::transport::Transport;

/// User agent string for EVAssist.
const USER_AGENT: &str = concat!("EVAssist/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport using a shared reqwest client.
///
/// No client-level timeout is configured: the deadline is enforced by
/// [`NetworkCall`](crate::NetworkCall), which drops the in-flight future.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::InvalidRequest(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { inner: client })
    }

    /// Wraps an existing reqwest client.
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.inner.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let body = response.bytes().await?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
