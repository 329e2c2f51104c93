//! HTTP request building with Strata-specific auth modes.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The method name as it appears in a signature base string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// How a request authenticates.
///
/// The split is load-bearing: schema and unauthenticated data operations
/// carry a consumer-key signature header, session operations carry the
/// session cookie and omit the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign the request with the consumer key/secret.
    Signed,
    /// Attach the captured session cookie; no signature.
    Session,
    /// Neither; the request goes out bare.
    None,
}

/// Builder for HTTP requests.
///
/// A built request is a complete descriptor: URL, method, headers, body and
/// auth mode. It is constructed fresh per call and never mutated after
/// dispatch.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) auth: AuthMode,
    /// When set, any other status (even 2xx) fails the request.
    pub(crate) expected_status: Option<u16>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl RequestBuilder {
    /// Create a new request builder. Requests default to signed auth.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            auth: AuthMode::Signed,
            expected_status: None,
        }
    }

    /// Set the auth mode.
    pub fn auth(mut self, mode: AuthMode) -> Self {
        self.auth = mode;
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Set text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self.headers
            .insert("Content-Type".to_string(), "text/plain".to_string());
        self
    }

    /// Set bytes body.
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// Demand an exact response status. Without this, any non-error
    /// response counts as success.
    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The auth mode this request will dispatch with.
    pub fn auth_mode(&self) -> AuthMode {
        self.auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://api.example.com/messages/42")
            .header("X-Strata-Select", "message,author")
            .auth(AuthMode::Session);

        assert_eq!(req.method, RequestMethod::Get);
        assert_eq!(req.url, "https://api.example.com/messages/42");
        assert_eq!(req.auth, AuthMode::Session);
        assert_eq!(
            req.headers.get("X-Strata-Select"),
            Some(&"message,author".to_string())
        );
    }

    #[test]
    fn test_default_auth_is_signed() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://api.example.com/listapi");
        assert_eq!(req.auth, AuthMode::Signed);
    }

    #[test]
    fn test_json_body() {
        let data = serde_json::json!({"message": "hi"});
        let req = RequestBuilder::new(RequestMethod::Post, "https://api.example.com/messages")
            .json(&data)
            .unwrap();

        assert!(matches!(req.body, Some(RequestBody::Json(_))));
        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_expected_status() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://api.example.com/messages")
            .expect_status(201);
        assert_eq!(req.expected_status, Some(201));

        let req = RequestBuilder::new(RequestMethod::Get, "https://api.example.com/messages");
        assert_eq!(req.expected_status, None);
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(RequestMethod::Get.as_str(), "GET");
        assert_eq!(RequestMethod::Post.as_str(), "POST");
        assert_eq!(RequestMethod::Put.as_str(), "PUT");
        assert_eq!(RequestMethod::Delete.as_str(), "DELETE");
    }
}
