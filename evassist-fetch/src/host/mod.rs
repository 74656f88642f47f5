//! Host transports.
//!
//! - [`http`] - reqwest-backed [`Transport`](crate::Transport)

pub mod http;

pub use http::ReqwestTransport;
