//! AutoMod message checks.
//!
//! [`AutomodCheckMessage`] is a request body; [`AutomodCheckResponse`] is what comes back.

use crate::error::{PayloadError, decode};
use crate::helix_api::de;
use crate::helix_api::users::{PartialUser, UserRef};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

/// A message to run through AutoMod.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#check-automod-status>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomodCheckMessage {
    /// Caller-chosen id used to match the message to its [`AutomodCheckResponse`].
    #[serde(rename = "msg_id")]
    pub id: String,
    #[serde(rename = "msg_text")]
    pub text: String,
    /// The sender.
    #[serde(
        deserialize_with = "de::numeric_id",
        serialize_with = "id_as_string"
    )]
    pub user_id: u64,
}

fn id_as_string<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

impl AutomodCheckMessage {
    pub fn new(id: impl Into<String>, text: impl Into<String>, user_id: u64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            user_id,
        }
    }

    pub fn for_user(id: impl Into<String>, text: impl Into<String>, user: &PartialUser) -> Self {
        Self::new(id, text, user.id)
    }

    pub fn for_ref(id: impl Into<String>, text: impl Into<String>, user: &UserRef) -> Self {
        Self::new(id, text, user.id())
    }

    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("AutomodCheckMessage", payload)
    }

    /// The entry for the request's `data` array. Helix wants the user id as a string.
    pub fn to_payload(&self) -> Value {
        json!({
            "msg_id": self.id,
            "msg_text": self.text,
            "user_id": self.user_id.to_string(),
        })
    }
}

/// AutoMod's verdict on one [`AutomodCheckMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomodCheckResponse {
    #[serde(rename = "msg_id")]
    pub id: String,
    /// Whether the message would be allowed through.
    #[serde(rename = "is_permitted")]
    pub permitted: bool,
}

impl AutomodCheckResponse {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("AutomodCheckResponse", payload)
    }
}
