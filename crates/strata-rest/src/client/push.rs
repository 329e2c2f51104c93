//! Push notification registration and delivery.
//!
//! Both operations go to the push subdomain rather than the data API.

use tracing::instrument;

use strata_client::validate;

use crate::error::{Error, ErrorKind, Result};
use crate::types::{PushPayload, PushTarget, PushToken};

/// Endpoint registering a device token for a user.
const REGISTER_ENDPOINT: &str = "register_device_token";

/// Endpoint delivering a notification.
const NOTIFY_ENDPOINT: &str = "notifications";

impl super::StrataRestClient {
    /// Register a platform push token for a user.
    #[instrument(skip(self, token))]
    pub async fn register_push(&self, username: &str, token: &PushToken) -> Result<()> {
        validate::require_non_blank("username", username)?;
        validate::require_non_blank("token", &token.token)?;

        let url = self.client.push_url(REGISTER_ENDPOINT);
        let body = serde_json::json!({
            "userId": username,
            "token": token,
        });
        let request = self.client.post(url).json_value(body);
        self.client.execute(request).await?;
        Ok(())
    }

    /// Deliver a push notification.
    ///
    /// The target's user-id or token list is merged into the payload body
    /// under its fixed key (`users` / `tokens`) before posting.
    #[instrument(skip(self, payload, target))]
    pub async fn push(&self, payload: &PushPayload, target: &PushTarget) -> Result<()> {
        validate::require_non_empty("targets", target.values())?;

        let mut body = match serde_json::to_value(payload).map_err(strata_client::Error::from)? {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::new(ErrorKind::Other(format!(
                    "payload serialized to a non-object: {}",
                    other
                ))))
            }
        };
        body.insert(
            target.body_key().to_string(),
            serde_json::json!(target.values()),
        );

        let url = self.client.push_url(NOTIFY_ENDPOINT);
        let request = self.client.post(url).json_value(serde_json::Value::Object(body));
        self.client.execute(request).await?;
        Ok(())
    }
}
