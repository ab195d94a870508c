//! Channel subscriptions.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::{PartialUser, UserRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user's subscription to a channel.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-broadcaster-subscriptions>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionEvent {
    pub broadcaster: UserRef,
    /// The subscriber.
    pub user: UserRef,
    /// `1`, `2` or `3`.
    pub tier: u8,
    pub plan_name: String,
    pub gift: bool,
    /// Who paid for a gifted subscription.
    pub gifter: Option<PartialUser>,
}

#[derive(Deserialize)]
struct RawSubscription {
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_name: String,
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
    #[serde(deserialize_with = "de::tier")]
    tier: u8,
    plan_name: String,
    is_gift: bool,
    #[serde(default, deserialize_with = "de::optional_numeric_id")]
    gifter_id: Option<u64>,
    #[serde(default)]
    gifter_name: Option<String>,
}

impl SubscriptionEvent {
    pub fn from_payload(
        http: &HelixHttp,
        payload: &Value,
        broadcaster: Option<UserRef>,
        user: Option<UserRef>,
    ) -> Result<Self, PayloadError> {
        let raw: RawSubscription = decode("SubscriptionEvent", payload)?;
        let gifter = raw.gifter_id.map(|id| {
            let name = raw.gifter_name.filter(|name| !name.is_empty());
            PartialUser::new(http, id, name)
        });

        Ok(Self {
            broadcaster: UserRef::supplied_or(
                broadcaster,
                http,
                raw.broadcaster_id,
                Some(raw.broadcaster_name),
            ),
            user: UserRef::supplied_or(user, http, raw.user_id, Some(raw.user_name)),
            tier: raw.tier,
            plan_name: raw.plan_name,
            gift: raw.is_gift,
            gifter,
        })
    }
}
