//! Webhook subscriptions.

use crate::error::{PayloadError, decode};
use crate::helix_api::de;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub callback: String,
    /// Older payloads spell this `expired_at`.
    #[serde(alias = "expired_at", deserialize_with = "de::timestamp")]
    pub expires_at: Timestamp,
    pub topic: String,
}

impl WebhookSubscription {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("WebhookSubscription", payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn either_expiry_key() {
        let current = WebhookSubscription::from_payload(&json!({
            "topic": "https://api.twitch.tv/helix/streams?user_id=123",
            "callback": "http://example.com/your_callback",
            "expires_at": "2018-07-30T20:00:00Z"
        }))
        .unwrap();
        let legacy = WebhookSubscription::from_payload(&json!({
            "topic": "https://api.twitch.tv/helix/streams?user_id=123",
            "callback": "http://example.com/your_callback",
            "expired_at": "2018-07-30T20:00:00Z"
        }))
        .unwrap();
        assert_eq!(current, legacy);
        assert_eq!(current.expires_at.to_string(), "2018-07-30T20:00:00Z");
    }

    #[test]
    fn no_expiry() {
        let err = WebhookSubscription::from_payload(&json!({ "topic": "t", "callback": "c" }))
            .unwrap_err();
        assert_eq!(err.missing_field(), Some("expires_at"));
    }
}
