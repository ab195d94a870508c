//! Teams, seen from the team or from one of its channels.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fields every team payload shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDetails {
    pub id: String,
    /// The team's login-style name.
    pub team_name: String,
    pub team_display_name: String,
    pub info: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub background_image_url: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    pub updated_at: Timestamp,
}

/// A team and its members.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-teams>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub details: TeamDetails,
    pub users: Vec<PartialUser>,
}

/// A team a channel belongs to.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-channel-teams>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelTeam {
    pub details: TeamDetails,
    /// The member channel that was asked about.
    pub broadcaster: PartialUser,
}

#[derive(Deserialize)]
struct RawTeam {
    #[serde(flatten)]
    details: TeamDetails,
    users: Vec<RawMember>,
}

#[derive(Deserialize)]
struct RawMember {
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_login: String,
}

#[derive(Deserialize)]
struct RawChannelTeam {
    #[serde(flatten)]
    details: TeamDetails,
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_login: String,
}

impl Team {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawTeam = decode("Team", payload)?;
        Ok(Self {
            details: raw.details,
            users: raw
                .users
                .into_iter()
                .map(|m| PartialUser::new(http, m.user_id, Some(m.user_login)))
                .collect(),
        })
    }
}

impl ChannelTeam {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawChannelTeam = decode("ChannelTeam", payload)?;
        Ok(Self {
            details: raw.details,
            broadcaster: PartialUser::new(http, raw.broadcaster_id, Some(raw.broadcaster_login)),
        })
    }
}
