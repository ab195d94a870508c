//! Live streams and channel information.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::types::expand_dimensions;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A live stream.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-streams>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stream {
    pub id: String,
    /// The broadcaster.
    pub user: PartialUser,
    pub game_id: String,
    pub game_name: String,
    /// `live`, or empty if the stream ended while the response was built.
    pub kind: String,
    pub title: String,
    pub viewer_count: u64,
    pub started_at: Timestamp,
    pub language: String,
    /// Template URL with `{width}` and `{height}`; see [`Stream::thumbnail`].
    pub thumbnail_url: String,
    /// Deprecated by Twitch in favour of `tags`.
    pub tag_ids: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_mature: bool,
}

#[derive(Deserialize)]
struct RawStream {
    id: String,
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
    game_id: String,
    game_name: String,
    #[serde(rename = "type")]
    kind: String,
    title: String,
    viewer_count: u64,
    #[serde(deserialize_with = "de::timestamp")]
    started_at: Timestamp,
    language: String,
    thumbnail_url: String,
    #[serde(default)]
    tag_ids: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    is_mature: bool,
}

impl Stream {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawStream = decode("Stream", payload)?;
        Ok(Self {
            id: raw.id,
            user: PartialUser::new(http, raw.user_id, Some(raw.user_name)),
            game_id: raw.game_id,
            game_name: raw.game_name,
            kind: raw.kind,
            title: raw.title,
            viewer_count: raw.viewer_count,
            started_at: raw.started_at,
            language: raw.language,
            thumbnail_url: raw.thumbnail_url,
            tag_ids: raw.tag_ids,
            tags: raw.tags,
            is_mature: raw.is_mature,
        })
    }

    /// The preview image URL at the given size.
    pub fn thumbnail(&self, width: u32, height: u32) -> String {
        expand_dimensions(&self.thumbnail_url, width, height)
    }
}

/// A channel's settings, as shown on its page.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-channel-information>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelInfo {
    pub user: PartialUser,
    pub game_id: String,
    pub game_name: String,
    pub title: String,
    pub language: String,
    /// Stream delay in seconds. Only visible to the broadcaster's own token; zero otherwise.
    pub delay: u32,
}

#[derive(Deserialize)]
struct RawChannelInfo {
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_name: String,
    game_id: String,
    game_name: String,
    title: String,
    broadcaster_language: String,
    delay: u32,
}

impl ChannelInfo {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawChannelInfo = decode("ChannelInfo", payload)?;
        Ok(Self {
            user: PartialUser::new(http, raw.broadcaster_id, Some(raw.broadcaster_name)),
            game_id: raw.game_id,
            game_name: raw.game_name,
            title: raw.title,
            language: raw.broadcaster_language,
            delay: raw.delay,
        })
    }
}
