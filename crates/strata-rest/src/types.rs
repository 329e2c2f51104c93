//! Value objects for push notifications and social login.

use serde::{Deserialize, Serialize};

/// The platform a push token was issued by.
///
/// The per-platform clients of old differed only in which token kind they
/// registered; that difference lives entirely in this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPlatform {
    /// An Android registration id.
    Android,
    /// An iOS device token.
    Ios,
}

impl PushPlatform {
    /// The wire name of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            PushPlatform::Android => "android",
            PushPlatform::Ios => "ios",
        }
    }
}

/// An opaque platform-issued token routing notifications to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushToken {
    /// The issuing platform.
    #[serde(rename = "type")]
    pub platform: PushPlatform,
    /// The opaque token string.
    pub token: String,
}

impl PushToken {
    /// Create a token value.
    pub fn new(platform: PushPlatform, token: impl Into<String>) -> Self {
        Self {
            platform,
            token: token.into(),
        }
    }
}

/// A push notification payload.
///
/// Named accessors cover the well-known keys; everything else rides in the
/// open bag and is serialized alongside them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPayload {
    /// Badge count to display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i32>,
    /// Sound file to play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Alert text to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// Any additional notification keys.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PushPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the badge count.
    pub fn with_badge(mut self, badge: i32) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set the sound filename.
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Set the alert text.
    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    /// Set an arbitrary extra key.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Who a notification is delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    /// Deliver to the devices registered for these user ids.
    Users(Vec<String>),
    /// Deliver straight to these device tokens.
    Tokens(Vec<String>),
}

impl PushTarget {
    /// The fixed body key the target list is merged under.
    pub fn body_key(&self) -> &'static str {
        match self {
            PushTarget::Users(_) => "users",
            PushTarget::Tokens(_) => "tokens",
        }
    }

    /// The target list.
    pub fn values(&self) -> &[String] {
        match self {
            PushTarget::Users(v) => v,
            PushTarget::Tokens(v) => v,
        }
    }
}

/// Result of a third-party login: the resolved username plus the nested
/// provider-info object (`fb` / `tw`) from the response.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialLogin {
    /// The username of the logged-in account.
    pub username: String,
    /// Provider-specific account info, as the server sent it.
    pub provider: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_token_serialization() {
        let token = PushToken::new(PushPlatform::Android, "reg-123");
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "android", "token": "reg-123"})
        );

        let token = PushToken::new(PushPlatform::Ios, "dev-456");
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value, serde_json::json!({"type": "ios", "token": "dev-456"}));
    }

    #[test]
    fn test_push_payload_known_keys() {
        let payload = PushPayload::new()
            .with_badge(3)
            .with_sound("ping.caf")
            .with_alert("hello");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"badge": 3, "sound": "ping.caf", "alert": "hello"})
        );
    }

    #[test]
    fn test_push_payload_open_bag() {
        let payload = PushPayload::new()
            .with_alert("hello")
            .with_extra("thread", serde_json::json!("chat-7"));

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["alert"], "hello");
        assert_eq!(value["thread"], "chat-7");
        // Unset well-known keys are omitted entirely.
        assert!(value.get("badge").is_none());
        assert!(value.get("sound").is_none());
    }

    #[test]
    fn test_push_payload_roundtrip() {
        let payload = PushPayload::new()
            .with_badge(1)
            .with_extra("k", serde_json::json!(true));
        let value = serde_json::to_value(&payload).unwrap();
        let back: PushPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back.badge, Some(1));
        assert_eq!(back.extra.get("k"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_push_target() {
        let target = PushTarget::Users(vec!["ada".into(), "grace".into()]);
        assert_eq!(target.body_key(), "users");
        assert_eq!(target.values().len(), 2);

        let target = PushTarget::Tokens(vec!["tok".into()]);
        assert_eq!(target.body_key(), "tokens");
    }
}
