//! # strata-api
//!
//! A Strata backend-as-a-service client library for Rust.
//!
//! This library provides typed access to the Strata REST and push APIs with
//! request signing, session management, and error translation built in.
//!
//! ## Security
//!
//! - Sensitive data (consumer secrets, session cookies) are redacted in
//!   Debug output
//! - Tracing/logging skips credential parameters
//!
//! ## Crates
//!
//! - **strata-client** - Core HTTP client infrastructure: request building,
//!   async execution, server-error translation
//! - **strata-auth** - Credentials, request signing, and session state
//! - **strata-rest** - The SDK surface: schema-driven CRUD, relationships,
//!   login (including Facebook/Twitter), and push notifications
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strata_auth::Credentials;
//! use strata_rest::StrataRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::new("consumer-key", "consumer-secret");
//!     let client = StrataRestClient::new(creds)?;
//!
//!     // Create a record in a dynamically-typed schema
//!     let stored: serde_json::Value = client
//!         .create("messages", &serde_json::json!({"message": "hi"}))
//!         .await?;
//!
//!     println!("{}", stored["messages_id"]);
//!     Ok(())
//! }
//! ```

// Re-export member crates for convenient access
#[cfg(feature = "auth")]
pub use strata_auth as auth;
#[cfg(feature = "client")]
pub use strata_client as client;
#[cfg(feature = "rest")]
pub use strata_rest as rest;

#[cfg(feature = "rest")]
pub use strata_rest::StrataRestClient;

#[cfg(feature = "auth")]
pub use strata_auth::Credentials;
