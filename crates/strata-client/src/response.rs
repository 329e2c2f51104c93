//! HTTP response handling and server-error translation.

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        let status = self.status();
        (200..300).contains(&status)
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// All `Set-Cookie` header values on this response.
    pub fn set_cookies(&self) -> Vec<String> {
        self.inner
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
            .collect()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<bytes::Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Check for a server-reported error and convert to the appropriate
    /// error type. Success and 304 pass through untouched.
    pub(crate) async fn check_api_error(self) -> Result<Response> {
        let status = self.status();

        if self.is_success() || status == 304 {
            return Ok(self);
        }

        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Parse a non-success response body and convert it to an error.
///
/// Structured JSON error bodies describing field-level errors are folded
/// into one descriptive message (field:value lines joined). Translation is
/// best-effort: a body that fails to parse falls back to the plain HTTP
/// error.
fn parse_error_response(status: u16, body: &str) -> Error {
    if let Some(detail) = fold_error_body(body) {
        return Error::new(ErrorKind::Api {
            status,
            message: detail,
        });
    }

    let message = body.trim().to_string();
    let kind = match status {
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

/// Fold a structured JSON error object into `field: value` lines.
///
/// Returns None when the body is not a JSON object with usable entries.
fn fold_error_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    if object.is_empty() {
        return None;
    }

    let lines: Vec<String> = object
        .iter()
        .map(|(field, detail)| match detail.as_str() {
            Some(text) => format!("{}: {}", field, text),
            None => format!("{}: {}", field, detail),
        })
        .collect();

    Some(lines.join("; "))
}
