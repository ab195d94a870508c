//! Hype train events.
//!
//! Contributions identify users by id only. The resulting [`PartialUser`]s have no name and
//! are not resolved eagerly; call [`PartialUser::fetch`] if the profile is needed.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a hype train contribution was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionType {
    Bits,
    Subs,
    Other,
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits => write!(f, "BITS"),
            Self::Subs => write!(f, "SUBS"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// A contribution to a hype train.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypeTrainContribution {
    /// For [`ContributionType::Bits`], the Bits used. For [`ContributionType::Subs`], the sum
    /// of 500, 1000 or 2500 per tier 1, 2 or 3 subscription.
    pub total: u64,
    pub kind: ContributionType,
    pub user: PartialUser,
}

#[derive(Deserialize)]
struct RawContribution {
    total: u64,
    #[serde(rename = "type")]
    kind: ContributionType,
    #[serde(deserialize_with = "de::numeric_id")]
    user: u64,
}

impl RawContribution {
    fn build(self, http: &HelixHttp) -> HypeTrainContribution {
        HypeTrainContribution {
            total: self.total,
            kind: self.kind,
            user: PartialUser::new(http, self.user, None),
        }
    }
}

impl HypeTrainContribution {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawContribution = decode("HypeTrainContribution", payload)?;
        Ok(raw.build(http))
    }
}

/// A hype train progress event.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-hype-train-events>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypeTrainEvent {
    /// The id of this event.
    pub id: String,
    /// The id of the hype train itself, shared by all its events.
    pub event_id: String,
    /// The event type, e.g. `hypetrain.progression`.
    pub kind: String,
    pub version: String,
    pub broadcaster: PartialUser,
    pub timestamp: Timestamp,
    /// When another hype train may start.
    pub cooldown_end_time: Timestamp,
    /// When this hype train ends.
    pub expires_at: Timestamp,
    pub started_at: Timestamp,
    pub last_contribution: HypeTrainContribution,
    pub level: u32,
    /// The top contributors, one per contribution type.
    pub top_contributions: Vec<HypeTrainContribution>,
    /// Points contributed to the hype train so far.
    pub total: u64,
    /// Points needed to reach the next level.
    pub goal: u64,
}

#[derive(Deserialize)]
struct RawHypeTrainEvent {
    id: String,
    event_type: String,
    #[serde(deserialize_with = "de::timestamp")]
    event_timestamp: Timestamp,
    version: String,
    event_data: RawHypeTrainData,
}

#[derive(Deserialize)]
struct RawHypeTrainData {
    id: String,
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    #[serde(deserialize_with = "de::timestamp")]
    cooldown_end_time: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    expires_at: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    started_at: Timestamp,
    last_contribution: RawContribution,
    level: u32,
    top_contributions: Vec<RawContribution>,
    total: u64,
    goal: u64,
}

impl HypeTrainEvent {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawHypeTrainEvent = decode("HypeTrainEvent", payload)?;
        let data = raw.event_data;
        Ok(Self {
            id: raw.id,
            event_id: data.id,
            kind: raw.event_type,
            version: raw.version,
            broadcaster: PartialUser::new(http, data.broadcaster_id, None),
            timestamp: raw.event_timestamp,
            cooldown_end_time: data.cooldown_end_time,
            expires_at: data.expires_at,
            started_at: data.started_at,
            last_contribution: data.last_contribution.build(http),
            level: data.level,
            top_contributions: data
                .top_contributions
                .into_iter()
                .map(|c| c.build(http))
                .collect(),
            total: data.total,
            goal: data.goal,
        })
    }
}
