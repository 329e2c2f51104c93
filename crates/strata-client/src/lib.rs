//! # strata-client
//!
//! Core HTTP client infrastructure for the Strata APIs.
//!
//! This crate provides the foundational HTTP client with:
//! - Request descriptors with a dual auth mode (signed vs. session cookie)
//! - Fully asynchronous execution that resolves exactly once
//! - Optional exact expected-status checking per request
//! - Server-error translation (structured JSON error bodies folded into
//!   descriptive messages)
//! - Connection pooling and request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (strata-rest)                                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StrataClient                            │
//! │  - Composes api/push URLs, applies auth mode                │
//! │  - Provides typed JSON methods (get_json, post_json, etc.)  │
//! │  - Holds the session-cookie slot                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Raw HTTP dispatch, expected-status enforcement           │
//! │  - Error translation on non-success responses               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries are performed anywhere: a single failed attempt is surfaced
//! directly to the caller.

mod client;
mod config;
mod error;
mod request;
mod response;
mod sign;
mod strata_client;
pub mod validate;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{AuthMode, RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use sign::SignRequest;
pub use strata_client::StrataClient;

/// Default API host. Requests go to `https://{subdomain}.{host}`.
pub const DEFAULT_HOST: &str = "stratahq.com";

/// Default Strata API version, stamped into the Accept header.
pub const DEFAULT_API_VERSION: &str = "1";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("strata-api/", env!("CARGO_PKG_VERSION"));

/// Render the versioned Accept header value for a given API version.
pub fn accept_header(api_version: &str) -> String {
    format!("application/vnd.strata+json; version={}", api_version)
}
