//! # strata-rest
//!
//! The Strata SDK surface: CRUD on dynamically-typed schemas, relationship
//! management, session-based user authentication (including Facebook and
//! Twitter login), and push notification registration/delivery.
//!
//! ## Features
//!
//! - **CRUD** - Create, read (with filters and field selection), update,
//!   delete records of any schema
//! - **Relationships** - Create related records, append to array fields,
//!   delete from relationships with optional cascade
//! - **Schema registry** - Lazily fetched, cached API descriptor used to
//!   resolve a type's identity field
//! - **Sessions** - Login/logout with session-cookie auth and a 30-minute
//!   client-side freshness window
//! - **Social** - Facebook/Twitter account creation, login, linking,
//!   profile fetch and posting
//! - **Push** - Device-token registration and notification delivery via
//!   the push subdomain
//!
//! ## Example
//!
//! ```rust,ignore
//! use strata_auth::Credentials;
//! use strata_rest::StrataRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), strata_rest::Error> {
//!     let client = StrataRestClient::new(Credentials::new("key", "secret"))?;
//!
//!     // Create
//!     let stored: serde_json::Value = client
//!         .create("messages", &serde_json::json!({"message": "hi"}))
//!         .await?;
//!
//!     // Read back
//!     let fetched: serde_json::Value = client
//!         .get("messages", stored["messages_id"].as_str().unwrap())
//!         .await?;
//!
//!     // Delete
//!     client
//!         .delete("messages", fetched["messages_id"].as_str().unwrap())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod schema;
mod types;

pub use client::StrataRestClient;
pub use error::{Error, ErrorKind, Result};
pub use schema::{Schema, SchemaProperty, SchemaRegistry, TypeDescriptor};
pub use types::{PushPayload, PushPlatform, PushTarget, PushToken, SocialLogin};

// Re-export pieces users need to construct and configure a client
pub use strata_auth::{Credentials, Session, SESSION_WINDOW};
pub use strata_client::{ClientConfig, ClientConfigBuilder};

/// The reserved user schema every account has.
pub const USER_SCHEMA: &str = "users";

/// The fixed endpoint serving the full API/schema descriptor.
pub const LIST_API_ENDPOINT: &str = "listapi";
