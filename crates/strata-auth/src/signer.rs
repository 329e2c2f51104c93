//! HMAC-SHA1 request signing.

use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use url::Url;
use uuid::Uuid;

use strata_client::{Error, ErrorKind, Result, SignRequest};

use crate::credentials::Credentials;

/// Everything except the RFC 3986 unreserved characters gets escaped in
/// signature material.
const SIGNATURE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn escape(value: &str) -> String {
    utf8_percent_encode(value, SIGNATURE_ESCAPE).to_string()
}

/// OAuth 1.0a two-legged signer.
///
/// Produces an `Authorization` header from the consumer key/secret, HTTP
/// method, and complete request URL: the query parameters and the standard
/// `oauth_*` protocol parameters are normalized into a signature base
/// string, MACed with HMAC-SHA1, and base64-encoded. There is no user
/// token; authenticated user operations ride the session cookie instead of
/// per-request signing.
#[derive(Debug, Clone)]
pub struct OAuth1Signer {
    credentials: Credentials,
}

impl OAuth1Signer {
    /// Create a signer over the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The credentials this signer signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn authorization_at(
        &self,
        method: &str,
        url: &Url,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String> {
        let oauth_params = [
            ("oauth_consumer_key", self.credentials.consumer_key()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_version", "1.0"),
        ];

        // Query parameters and protocol parameters are escaped first, then
        // sorted by the escaped forms, per the normalization rules.
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (escape(&k), escape(&v)))
            .collect();
        pairs.extend(
            oauth_params
                .iter()
                .map(|(k, v)| (escape(k), escape(v))),
        );
        pairs.sort();

        let normalized = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            escape(base_url.as_str()),
            escape(&normalized)
        );

        // Two-legged: the token secret half of the key is empty.
        let key = format!("{}&", escape(self.credentials.consumer_secret()));
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .map_err(|e| Error::new(ErrorKind::Signing(e.to_string())))?;
        mac.update(base_string.as_bytes());
        let signature =
            base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_nonce=\"{}\", oauth_signature=\"{}\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"{}\", oauth_version=\"1.0\"",
            escape(self.credentials.consumer_key()),
            escape(nonce),
            escape(&signature),
            escape(timestamp),
        ))
    }
}

impl SignRequest for OAuth1Signer {
    fn authorization(&self, method: &str, url: &Url) -> Result<String> {
        let timestamp = Utc::now().timestamp().to_string();
        let nonce = Uuid::new_v4().simple().to_string();
        self.authorization_at(method, url, &timestamp, &nonce)
    }
}
