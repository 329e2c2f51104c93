//! Third-party (Facebook/Twitter) account operations.
//!
//! Every operation is a GET to a fixed sub-endpoint of the user schema
//! with provider-specific query parameters: Facebook sends an access
//! token, Twitter a token/secret pair. The login variants behave like
//! [`login`](super::StrataRestClient::login): they capture the session
//! cookie and record the session.

use tracing::instrument;

use strata_auth::Session;
use strata_client::{validate, AuthMode};

use crate::error::{Error, ErrorKind, Result};
use crate::types::SocialLogin;
use crate::USER_SCHEMA;

use super::pair_query;

const FACEBOOK_TOKEN_PARAM: &str = "fb_at";
const TWITTER_TOKEN_PARAM: &str = "tw_tk";
const TWITTER_SECRET_PARAM: &str = "tw_ts";

impl super::StrataRestClient {
    // =========================================================================
    // Facebook
    // =========================================================================

    /// Create a user account backed by a Facebook access token.
    #[instrument(skip(self, access_token))]
    pub async fn create_user_with_facebook(
        &self,
        access_token: &str,
    ) -> Result<serde_json::Value> {
        validate::require_non_blank("access token", access_token)?;
        let query = pair_query(&[(FACEBOOK_TOKEN_PARAM, access_token)]);
        self.social_get("createUserWithFacebook", &query).await
    }

    /// Log in with a Facebook access token.
    #[instrument(skip(self, access_token))]
    pub async fn login_with_facebook(&self, access_token: &str) -> Result<SocialLogin> {
        validate::require_non_blank("access token", access_token)?;
        let query = pair_query(&[(FACEBOOK_TOKEN_PARAM, access_token)]);
        self.social_login("facebookLogin", &query, "fb").await
    }

    /// Link the logged-in account to a Facebook account.
    #[instrument(skip(self, access_token))]
    pub async fn link_facebook(&self, access_token: &str) -> Result<serde_json::Value> {
        validate::require_non_blank("access token", access_token)?;
        let query = pair_query(&[(FACEBOOK_TOKEN_PARAM, access_token)]);
        self.social_session_get("linkUserWithFacebook", Some(&query))
            .await
    }

    /// Fetch the linked Facebook account's profile info.
    #[instrument(skip(self))]
    pub async fn facebook_user_info(&self) -> Result<serde_json::Value> {
        self.social_session_get("getFacebookUserInfo", None).await
    }

    /// Post a message to the linked Facebook account's wall.
    #[instrument(skip(self, message))]
    pub async fn post_to_facebook(&self, message: &str) -> Result<serde_json::Value> {
        validate::require_non_blank("message", message)?;
        let query = pair_query(&[("message", message)]);
        self.social_session_get("postFacebookMessage", Some(&query))
            .await
    }

    // =========================================================================
    // Twitter
    // =========================================================================

    /// Create a user account backed by a Twitter token/secret pair.
    #[instrument(skip(self, token, secret))]
    pub async fn create_user_with_twitter(
        &self,
        token: &str,
        secret: &str,
    ) -> Result<serde_json::Value> {
        validate::require_non_blank("token", token)?;
        validate::require_non_blank("secret", secret)?;
        let query = pair_query(&[(TWITTER_TOKEN_PARAM, token), (TWITTER_SECRET_PARAM, secret)]);
        self.social_get("createUserWithTwitter", &query).await
    }

    /// Log in with a Twitter token/secret pair.
    #[instrument(skip(self, token, secret))]
    pub async fn login_with_twitter(&self, token: &str, secret: &str) -> Result<SocialLogin> {
        validate::require_non_blank("token", token)?;
        validate::require_non_blank("secret", secret)?;
        let query = pair_query(&[(TWITTER_TOKEN_PARAM, token), (TWITTER_SECRET_PARAM, secret)]);
        self.social_login("twitterLogin", &query, "tw").await
    }

    /// Link the logged-in account to a Twitter account.
    #[instrument(skip(self, token, secret))]
    pub async fn link_twitter(&self, token: &str, secret: &str) -> Result<serde_json::Value> {
        validate::require_non_blank("token", token)?;
        validate::require_non_blank("secret", secret)?;
        let query = pair_query(&[(TWITTER_TOKEN_PARAM, token), (TWITTER_SECRET_PARAM, secret)]);
        self.social_session_get("linkUserWithTwitter", Some(&query))
            .await
    }

    /// Fetch the linked Twitter account's profile info.
    #[instrument(skip(self))]
    pub async fn twitter_user_info(&self) -> Result<serde_json::Value> {
        self.social_session_get("getTwitterUserInfo", None).await
    }

    /// Post a status update to the linked Twitter account.
    #[instrument(skip(self, status))]
    pub async fn post_to_twitter(&self, status: &str) -> Result<serde_json::Value> {
        validate::require_non_blank("status", status)?;
        let query = pair_query(&[("tw_st", status)]);
        self.social_session_get("twitterStatusUpdate", Some(&query))
            .await
    }

    // =========================================================================
    // Shared plumbing
    // =========================================================================

    /// Signed GET to a user-schema sub-endpoint.
    async fn social_get(&self, endpoint: &str, query: &str) -> Result<serde_json::Value> {
        let url = self.client.api_url(USER_SCHEMA, Some(endpoint), Some(query));
        Ok(self.client.get_json(&url, AuthMode::Signed).await?)
    }

    /// Session-authenticated GET to a user-schema sub-endpoint.
    async fn social_session_get(
        &self,
        endpoint: &str,
        query: Option<&str>,
    ) -> Result<serde_json::Value> {
        let url = self.client.api_url(USER_SCHEMA, Some(endpoint), query);
        Ok(self.client.get_json(&url, AuthMode::Session).await?)
    }

    /// Signed GET that establishes a session: captures the cookie, parses
    /// the username and nested provider info, and records the session.
    async fn social_login(
        &self,
        endpoint: &str,
        query: &str,
        provider_key: &str,
    ) -> Result<SocialLogin> {
        let url = self.client.api_url(USER_SCHEMA, Some(endpoint), Some(query));
        let response = self.client.execute(self.client.get(url)).await?;
        self.client.capture_session_cookie(&response);

        let body: serde_json::Value = response.json().await?;
        let username = body
            .get("username")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                Error::new(ErrorKind::UnexpectedResponse(format!(
                    "{} response has no username",
                    endpoint
                )))
            })?
            .to_string();
        let provider = body.get(provider_key).cloned().unwrap_or_default();

        let username_field = self
            .schema
            .primary_key_field(&self.client, USER_SCHEMA, None)
            .await?;
        self.set_session(Session::begin(username.clone(), username_field));

        Ok(SocialLogin { username, provider })
    }
}
