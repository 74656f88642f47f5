//! Network call with timeout and retry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::error::NetworkError;
use crate::request::{HttpRequest, HttpResponse};
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Uniform wrapper around a [`Transport`].
///
/// Every endpoint client goes through this type, so the timeout and the
/// [`RetryPolicy`] are applied in exactly one place.
#[derive(Clone)]
pub struct NetworkCall {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl NetworkCall {
    /// Creates a call wrapper with the default retry policy.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Issues `request` once, aborting it if no response arrives within
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::Timeout`] when the deadline passes
    /// - [`NetworkError::Http`] for a non-2xx response
    /// - [`NetworkError::Connection`] for transport failures
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(
        &self,
        request: &HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, NetworkError> {
        if timeout.is_zero() {
            return Err(NetworkError::InvalidRequest(
                "timeout must be positive".to_string(),
            ));
        }

        // Dropping the transport future on timeout aborts the request.
        let response = match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis(), "Request timed out");
                return Err(NetworkError::Timeout(timeout));
            }
        };

        if response.is_success() {
            debug!(status = response.status, "Request succeeded");
            Ok(response)
        } else {
            debug!(status = response.status, "Request failed with HTTP error");
            Err(NetworkError::Http {
                status: response.status,
                body: response.text(),
            })
        }
    }

    /// Issues `request` under the configured [`RetryPolicy`].
    ///
    /// Transient failures are retried with a fixed delay until the attempt
    /// budget is spent; the last error is returned.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt.
    pub async fn execute_with_retry(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        let max_attempts = self.policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(url = %request.url, attempt, "Making request");

            match self.execute(request, self.policy.timeout).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < max_attempts && self.policy.should_retry(&e) => {
                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl fmt::Debug for NetworkCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCall")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
