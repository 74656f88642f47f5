//! Fetch context wiring a transport to the endpoint clients.
//!
//! The context owns one [`NetworkCall`] configured from [`FetchSettings`],
//! so every endpoint shares the same timeout and retry policy.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{NearbyClient, PredictionClient};
use crate::client::NetworkCall;
use crate::error::NetworkError;
use crate::host::http::ReqwestTransport;
use crate::retry::RetryPolicy;
use crate::transport::Transport;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Backend base URL.
    pub base_url: String,
    /// Results per nearby page.
    pub page_size: u32,
    /// Timeout for a single attempt.
    pub timeout: Duration,
    /// Maximum attempts per request.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
}

impl FetchSettings {
    /// Default backend base URL.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    /// Creates settings pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt budget and delay.
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay = retry_delay;
        self
    }

    /// Returns the retry policy these settings describe.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
            .with_timeout(self.timeout)
            .with_delay(self.retry_delay)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            page_size: NearbyClient::DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Entry point for talking to the backend.
#[derive(Debug, Clone)]
pub struct FetchContext {
    call: NetworkCall,
    settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context using reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: FetchSettings) -> Result<Self, NetworkError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?), settings))
    }

    /// Creates a context over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>, settings: FetchSettings) -> Self {
        let call = NetworkCall::new(transport).with_policy(settings.retry_policy());
        Self { call, settings }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the settings.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Returns the shared network call.
    pub fn call(&self) -> &NetworkCall {
        &self.call
    }

    /// Returns a client for the nearby search.
    pub fn nearby_client(&self) -> NearbyClient {
        NearbyClient::new(self.call.clone(), self.settings.base_url.clone())
            .with_page_size(self.settings.page_size)
    }

    /// Returns a client for battery predictions.
    pub fn prediction_client(&self) -> PredictionClient {
        PredictionClient::new(self.call.clone(), self.settings.base_url.clone())
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a [`FetchContext`].
#[derive(Default)]
pub struct FetchContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.base_url = base_url.into();
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.settings.page_size = page_size;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Builds the context, falling back to reqwest when no transport was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP client cannot be built.
    pub fn build(self) -> Result<FetchContext, NetworkError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new()?),
        };
        Ok(FetchContext::with_transport(transport, self.settings))
    }
}

impl std::fmt::Debug for FetchContextBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContextBuilder")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
