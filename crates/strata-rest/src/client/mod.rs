//! The Strata REST API client.
//!
//! One platform-independent client covers every operation; the impl blocks
//! are split by area (CRUD, relationships, sessions, social, push).

use std::sync::{Arc, RwLock};

use strata_auth::{Credentials, OAuth1Signer, Session};
use strata_client::{ClientConfig, StrataClient};

use crate::error::Result;
use crate::schema::SchemaRegistry;

mod crud;
mod push;
mod relations;
mod session;
mod social;

/// Strata REST API client.
///
/// Provides typed methods for the whole SDK surface:
/// - CRUD operations on dynamically-typed schemas
/// - Relationship creation, appends, and deletes
/// - Session lifecycle (login/logout) with cookie-based auth
/// - Facebook/Twitter account operations
/// - Push notification registration and delivery
///
/// The client is cheap to clone; clones share the schema cache and session
/// state.
///
/// # Example
///
/// ```rust,ignore
/// use strata_rest::{Credentials, StrataRestClient};
///
/// let client = StrataRestClient::new(Credentials::new("key", "secret"))?;
///
/// // Create
/// let stored: serde_json::Value = client
///     .create("messages", &serde_json::json!({"message": "hi"}))
///     .await?;
///
/// // Get
/// let one: serde_json::Value = client.get("messages", "42").await?;
///
/// // Delete
/// client.delete("messages", "42").await?;
/// ```
#[derive(Debug, Clone)]
pub struct StrataRestClient {
    client: StrataClient,
    schema: Arc<SchemaRegistry>,
    session: Arc<RwLock<Option<Session>>>,
}

impl StrataRestClient {
    /// Create a new client with the default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let api_version = credentials.api_version().to_string();
        let signer = Arc::new(OAuth1Signer::new(credentials));
        let client = StrataClient::with_config(signer, &api_version, config)?;
        Ok(Self {
            client,
            schema: Arc::new(SchemaRegistry::new()),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the underlying StrataClient.
    pub fn inner(&self) -> &StrataClient {
        &self.client
    }

    /// The shared schema registry.
    pub fn schema_registry(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub(crate) fn current_session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|g| g.clone())
    }

    pub(crate) fn set_session(&self, session: Session) {
        if let Ok(mut slot) = self.session.write() {
            *slot = Some(session);
        }
    }

    pub(crate) fn clear_session(&self) {
        if let Ok(mut slot) = self.session.write() {
            *slot = None;
        }
    }
}

/// Build a `k=v` query string: each key and value URL-escaped, pairs joined
/// with `&`.
pub(crate) fn pair_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build a query string from raw filter expressions: each expression
/// URL-escaped and joined with `&`, no `k=v` structure.
pub(crate) fn expression_query(expressions: &[&str]) -> String {
    expressions
        .iter()
        .map(|e| urlencoding::encode(e).into_owned())
        .collect::<Vec<_>>()
        .join("&")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StrataRestClient::new(Credentials::new("key", "secret")).unwrap();
        assert_eq!(client.inner().api_base(), "https://api.stratahq.com");
        assert_eq!(client.inner().push_base(), "https://push.stratahq.com");
        assert!(!client.schema_registry().is_loaded());
    }

    #[test]
    fn test_clones_share_session_state() {
        let client = StrataRestClient::new(Credentials::new("key", "secret")).unwrap();
        let clone = client.clone();

        client.set_session(Session::begin("ada", "username"));
        assert_eq!(
            clone.current_session().map(|s| s.username().to_string()),
            Some("ada".to_string())
        );

        clone.clear_session();
        assert!(client.current_session().is_none());
    }

    #[test]
    fn test_pair_query() {
        assert_eq!(
            pair_query(&[("author", "ada lovelace"), ("limit", "10")]),
            "author=ada%20lovelace&limit=10"
        );
        assert_eq!(pair_query(&[]), "");
    }

    #[test]
    fn test_expression_query() {
        assert_eq!(
            expression_query(&["age>21", "name!=bob"]),
            "age%3E21&name%21%3Dbob"
        );
    }
}
