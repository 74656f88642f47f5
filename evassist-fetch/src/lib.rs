// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # EVAssist Fetch
//!
//! Network plumbing and backend clients for EVAssist.
//!
//! ## Layers
//!
//! - [`transport::Transport`] - the only raw I/O seam; [`host::http`] holds
//!   the reqwest implementation
//! - [`client::NetworkCall`] - timeout and [`retry::RetryPolicy`] applied
//!   uniformly to every request
//! - [`envelope`] - normalizes `{"data": ...}` wrapped responses
//! - [`api`] - endpoint clients for nearby search and battery prediction
//! - [`context::FetchContext`] - wires settings, transport and clients
//!
//! ## Example
//!
//! ```ignore
//! use evassist_core::Coordinate;
//! use evassist_fetch::{FetchContext, FetchSettings};
//!
//! let ctx = FetchContext::new(FetchSettings::new("https://api.example.com"))?;
//! let here = Coordinate::new(37.7749, -122.4194)?;
//! let page = ctx.nearby_client().fetch_page(&here, 1).await?;
//! ```

pub mod api;
pub mod client;
pub mod context;
pub mod envelope;
pub mod error;
pub mod host;
pub mod request;
pub mod retry;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
pub mod transport;

// Re-export key types at crate root

pub use api::{NearbyClient, NearbyResponse, PredictionClient, RawMechanic};
pub use client::NetworkCall;
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use envelope::unwrap_data;
pub use error::{FetchError, NetworkError, extract_message};
pub use host::ReqwestTransport;
pub use request::{HttpRequest, HttpResponse, Method};
pub use retry::RetryPolicy;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{ScriptedTransport, Step};
pub use transport::Transport;
