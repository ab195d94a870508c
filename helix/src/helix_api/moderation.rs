//! Bans and moderator changes.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::{PartialUser, UserRef};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BanEventType {
    #[serde(rename = "moderation.user.ban")]
    Ban,
    #[serde(rename = "moderation.user.unban")]
    Unban,
}

impl fmt::Display for BanEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ban => write!(f, "moderation.user.ban"),
            Self::Unban => write!(f, "moderation.user.unban"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModEventType {
    #[serde(rename = "moderation.moderator.add")]
    Add,
    #[serde(rename = "moderation.moderator.remove")]
    Remove,
}

impl fmt::Display for ModEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "moderation.moderator.add"),
            Self::Remove => write!(f, "moderation.moderator.remove"),
        }
    }
}

/// A user being banned from, or unbanned in, a channel.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-banned-events>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanEvent {
    pub id: String,
    pub kind: BanEventType,
    pub timestamp: Timestamp,
    pub version: f64,
    pub reason: String,
    /// The channel the ban happened in.
    pub broadcaster: UserRef,
    /// The banned user.
    pub user: PartialUser,
    pub moderator: PartialUser,
    /// When a timeout lifts; `None` for a permanent ban.
    pub expires_at: Option<Timestamp>,
}

#[derive(Deserialize)]
struct RawBanEvent {
    id: String,
    event_type: BanEventType,
    #[serde(deserialize_with = "de::timestamp")]
    event_timestamp: Timestamp,
    #[serde(deserialize_with = "de::lenient_float")]
    version: f64,
    event_data: RawBanData,
}

#[derive(Deserialize)]
struct RawBanData {
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_name: String,
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
    #[serde(deserialize_with = "de::numeric_id")]
    moderator_id: u64,
    moderator_name: String,
    reason: String,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    expires_at: Option<Timestamp>,
}

impl BanEvent {
    /// Builds the event, keeping `broadcaster` if the caller already holds that user.
    pub fn from_payload(
        http: &HelixHttp,
        payload: &Value,
        broadcaster: Option<UserRef>,
    ) -> Result<Self, PayloadError> {
        let raw: RawBanEvent = decode("BanEvent", payload)?;
        let data = raw.event_data;
        Ok(Self {
            id: raw.id,
            kind: raw.event_type,
            timestamp: raw.event_timestamp,
            version: raw.version,
            reason: data.reason,
            broadcaster: UserRef::supplied_or(
                broadcaster,
                http,
                data.broadcaster_id,
                Some(data.broadcaster_name),
            ),
            user: PartialUser::new(http, data.user_id, Some(data.user_name)),
            moderator: PartialUser::new(http, data.moderator_id, Some(data.moderator_name)),
            expires_at: data.expires_at,
        })
    }
}

/// A moderator being added to or removed from a channel.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-moderator-events>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModEvent {
    pub id: String,
    pub kind: ModEventType,
    pub timestamp: Timestamp,
    pub version: String,
    pub broadcaster: UserRef,
    /// The user gaining or losing moderator status.
    pub user: PartialUser,
}

#[derive(Deserialize)]
struct RawModEvent {
    id: String,
    event_type: ModEventType,
    #[serde(deserialize_with = "de::timestamp")]
    event_timestamp: Timestamp,
    version: String,
    event_data: RawModData,
}

#[derive(Deserialize)]
struct RawModData {
    #[serde(default, deserialize_with = "de::optional_numeric_id")]
    broadcaster_id: Option<u64>,
    #[serde(default)]
    broadcaster_name: Option<String>,
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
}

impl ModEvent {
    /// Builds the event.
    ///
    /// Without a supplied `broadcaster`, the channel is taken from `event_data.broadcaster_id`,
    /// which is then required.
    pub fn from_payload(
        http: &HelixHttp,
        payload: &Value,
        broadcaster: Option<UserRef>,
    ) -> Result<Self, PayloadError> {
        let raw: RawModEvent = decode("ModEvent", payload)?;
        let data = raw.event_data;
        let broadcaster = match (broadcaster, data.broadcaster_id) {
            (Some(supplied), _) => supplied,
            (None, Some(id)) => UserRef::supplied_or(None, http, id, data.broadcaster_name),
            (None, None) => return Err(PayloadError::missing("ModEvent", "broadcaster_id")),
        };

        Ok(Self {
            id: raw.id,
            kind: raw.event_type,
            timestamp: raw.event_timestamp,
            version: raw.version,
            broadcaster,
            user: PartialUser::new(http, data.user_id, Some(data.user_name)),
        })
    }
}

/// An entry in a channel's list of banned users.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-banned-users>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBan {
    pub user: PartialUser,
    pub created_at: Timestamp,
    /// `None` for a permanent ban.
    pub expires_at: Option<Timestamp>,
    pub reason: String,
    pub moderator: PartialUser,
}

#[derive(Deserialize)]
struct RawUserBan {
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_login: String,
    #[serde(deserialize_with = "de::timestamp")]
    created_at: Timestamp,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    expires_at: Option<Timestamp>,
    reason: String,
    #[serde(deserialize_with = "de::numeric_id")]
    moderator_id: u64,
    moderator_login: String,
}

impl UserBan {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawUserBan = decode("UserBan", payload)?;
        Ok(Self {
            user: PartialUser::new(http, raw.user_id, Some(raw.user_login)),
            created_at: raw.created_at,
            expires_at: raw.expires_at,
            reason: raw.reason,
            moderator: PartialUser::new(http, raw.moderator_id, Some(raw.moderator_login)),
        })
    }
}
