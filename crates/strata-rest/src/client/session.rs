//! Session lifecycle: login, logout, freshness, password reset.

use tracing::{debug, instrument};

use strata_auth::{Session, SESSION_WINDOW};
use strata_client::{validate, AuthMode};

use crate::error::{Error, ErrorKind, Result};
use crate::USER_SCHEMA;

use super::pair_query;

impl super::StrataRestClient {
    /// Log a user in.
    ///
    /// The user schema's identity field names the username parameter, so it
    /// is resolved through the schema registry first; the credential map is
    /// then sent as query parameters and the returned session cookie is
    /// captured for subsequent session-authenticated calls.
    ///
    /// Returns the server's representation of the logged-in user.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &[(&str, &str)]) -> Result<serde_json::Value> {
        validate::require_non_empty("credentials", credentials)?;

        let username_field = self
            .schema
            .primary_key_field(&self.client, USER_SCHEMA, None)
            .await?;

        let username = credentials
            .iter()
            .find(|(k, _)| *k == username_field)
            .map(|(_, v)| v.to_string())
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidArgument(format!(
                    "credentials must include the {} field",
                    username_field
                )))
            })?;

        let query = pair_query(credentials);
        let url = self
            .client
            .api_url(USER_SCHEMA, Some("login"), Some(&query));

        // The session does not exist yet, so the login request itself is
        // signed.
        let response = self.client.execute(self.client.get(url)).await?;
        self.client.capture_session_cookie(&response);
        let user: serde_json::Value = response.json().await?;

        self.set_session(Session::begin(username, username_field));
        debug!("Login recorded");
        Ok(user)
    }

    /// Whether a login happened less than 30 minutes ago.
    ///
    /// A local heuristic only, with no server round-trip. The server may have
    /// expired the session earlier; callers must tolerate that.
    pub fn is_logged_in(&self) -> bool {
        self.current_session()
            .map(|s| s.is_fresh(SESSION_WINDOW))
            .unwrap_or(false)
    }

    /// The username recorded by the last successful login, if any.
    pub fn logged_in_username(&self) -> Option<String> {
        self.current_session().map(|s| s.username().to_string())
    }

    /// Log the current user out.
    ///
    /// Succeeds immediately as a no-op when no login ever happened.
    /// Local session state and the cookie are cleared only after the
    /// logout request completes; requests already in flight keep the
    /// cookie they were dispatched with.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let session = match self.current_session() {
            Some(session) => session,
            None => return Ok(()),
        };

        let query = pair_query(&[(session.username_field(), session.username())]);
        let url = self
            .client
            .api_url(USER_SCHEMA, Some("logout"), Some(&query));

        self.client
            .execute(self.client.get(url).auth(AuthMode::Session))
            .await?;

        self.clear_session();
        self.client.clear_session_cookie();
        Ok(())
    }

    /// Start a password reset for the given username.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, username: &str) -> Result<()> {
        validate::require_non_blank("username", username)?;
        let query = pair_query(&[("username", username)]);
        let url = self
            .client
            .api_url(USER_SCHEMA, Some("forgotPassword"), Some(&query));
        self.client.execute(self.client.get(url)).await?;
        Ok(())
    }
}
