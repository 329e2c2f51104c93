//! # strata-auth
//!
//! Authentication building blocks for the Strata SDK:
//!
//! - [`Credentials`] - consumer key/secret plus the API version stamped
//!   into the Accept header; secret redacted in Debug output
//! - [`OAuth1Signer`] - the production [`SignRequest`] implementation:
//!   HMAC-SHA1 signatures over the standard OAuth 1.0a base string
//! - [`Session`] - client-side session state with the 30-minute freshness
//!   window
//!
//! Signed requests authenticate schema and unauthenticated data
//! operations; once a user logs in, session operations switch to the
//! captured session cookie and skip signing entirely.

mod credentials;
mod session;
mod signer;

pub use credentials::Credentials;
pub use session::{Session, SESSION_WINDOW};
pub use signer::OAuth1Signer;

pub use strata_client::SignRequest;
