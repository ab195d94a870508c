//! Stream tags.

use crate::error::{PayloadError, decode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// See: <https://dev.twitch.tv/docs/api/reference/#get-all-stream-tags>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "tag_id")]
    pub id: String,
    /// Whether Twitch applies the tag automatically.
    #[serde(rename = "is_auto")]
    pub auto: bool,
    /// Names keyed by locale, e.g. `en-us`.
    pub localization_names: BTreeMap<String, String>,
    pub localization_descriptions: BTreeMap<String, String>,
}

impl Tag {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("Tag", payload)
    }
}
