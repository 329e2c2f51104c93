//! Consumer credentials.

/// API credentials for a Strata application.
///
/// Immutable once constructed and shared read-only by every request the
/// client makes. The consumer secret is redacted in Debug output to
/// prevent accidental exposure in logs.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    api_version: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Credentials {
    /// Create credentials with the default API version.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            api_version: strata_client::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set the API version (e.g. "2").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// The consumer key.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The consumer secret (for internal use by the signer).
    pub(crate) fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// The API version string.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The versioned Accept header value.
    pub fn accept_header(&self) -> String {
        strata_client::accept_header(&self.api_version)
    }
}
