//! Follow relationships.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::UserRef;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One user following another.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-users-follows>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowEvent {
    /// The follower.
    pub from_user: UserRef,
    /// The followed channel.
    pub to_user: UserRef,
    pub followed_at: Timestamp,
}

#[derive(Deserialize)]
struct RawFollow {
    #[serde(deserialize_with = "de::numeric_id")]
    from_id: u64,
    from_name: String,
    #[serde(deserialize_with = "de::numeric_id")]
    to_id: u64,
    to_name: String,
    #[serde(deserialize_with = "de::timestamp")]
    followed_at: Timestamp,
}

impl FollowEvent {
    /// Builds the event. Either side may be supplied by the caller.
    pub fn from_payload(
        http: &HelixHttp,
        payload: &Value,
        from_user: Option<UserRef>,
        to_user: Option<UserRef>,
    ) -> Result<Self, PayloadError> {
        let raw: RawFollow = decode("FollowEvent", payload)?;
        Ok(Self {
            from_user: UserRef::supplied_or(from_user, http, raw.from_id, Some(raw.from_name)),
            to_user: UserRef::supplied_or(to_user, http, raw.to_id, Some(raw.to_name)),
            followed_at: raw.followed_at,
        })
    }
}
