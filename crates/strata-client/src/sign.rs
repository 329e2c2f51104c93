//! The request-signing seam.

use url::Url;

use crate::error::Result;

/// Produce an `Authorization` header value for a request.
///
/// The signing algorithm lives behind this trait so the executor stays
/// agnostic of it; `strata-auth` provides the production HMAC-SHA1
/// implementation, tests can drop in a fake.
pub trait SignRequest: Send + Sync + std::fmt::Debug {
    /// Sign a request given its HTTP method and complete URL (including
    /// any query string).
    fn authorization(&self, method: &str, url: &Url) -> Result<String>;
}
