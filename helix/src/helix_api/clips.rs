//! Clips.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A clip.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-clips>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clip {
    pub id: String,
    pub url: String,
    /// URL for embedding the clip in an iframe.
    pub embed_url: String,
    /// The channel the clip was taken from.
    pub broadcaster: PartialUser,
    /// The user who made the clip.
    pub creator: PartialUser,
    /// The VOD the clip was taken from; empty if the VOD is gone.
    pub video_id: String,
    pub game_id: String,
    pub language: String,
    pub title: String,
    pub views: u64,
    pub created_at: Timestamp,
    pub thumbnail_url: String,
}

#[derive(Deserialize)]
struct RawClip {
    id: String,
    url: String,
    embed_url: String,
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_name: String,
    #[serde(deserialize_with = "de::numeric_id")]
    creator_id: u64,
    creator_name: String,
    video_id: String,
    game_id: String,
    language: String,
    title: String,
    view_count: u64,
    #[serde(deserialize_with = "de::timestamp")]
    created_at: Timestamp,
    thumbnail_url: String,
}

impl Clip {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawClip = decode("Clip", payload)?;
        Ok(Self {
            id: raw.id,
            url: raw.url,
            embed_url: raw.embed_url,
            broadcaster: PartialUser::new(http, raw.broadcaster_id, Some(raw.broadcaster_name)),
            creator: PartialUser::new(http, raw.creator_id, Some(raw.creator_name)),
            video_id: raw.video_id,
            game_id: raw.game_id,
            language: raw.language,
            title: raw.title,
            views: raw.view_count,
            created_at: raw.created_at,
            thumbnail_url: raw.thumbnail_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn clip() -> Value {
        json!({
            "id": "AwkwardHelplessSalamanderSwiftRage",
            "url": "https://clips.twitch.tv/AwkwardHelplessSalamanderSwiftRage",
            "embed_url": "https://clips.twitch.tv/embed?clip=AwkwardHelplessSalamanderSwiftRage",
            "broadcaster_id": "67955580",
            "broadcaster_name": "ChewieMelodies",
            "creator_id": "53834192",
            "creator_name": "BlackNova03",
            "video_id": "205586603",
            "game_id": "488191",
            "language": "en",
            "title": "babymetal",
            "view_count": 10,
            "created_at": "2017-11-30T22:34:18Z",
            "thumbnail_url": "https://clips-media-assets.twitch.tv/157589949-preview-480x272.jpg",
            "duration": 60,
            "vod_offset": 480
        })
    }

    #[test]
    fn clip_users_are_placeholders() {
        let http = HelixHttp::detached();
        let clip = Clip::from_payload(&http, &clip()).unwrap();
        assert_eq!(
            clip.broadcaster,
            PartialUser::new(&http, 67955580, Some("ChewieMelodies".into()))
        );
        assert_eq!(clip.creator.to_string(), "BlackNova03 (53834192)");
        assert_eq!(clip.views, 10);
        assert_eq!(clip.created_at.to_string(), "2017-11-30T22:34:18Z");
    }

    #[test]
    fn every_clip_field_is_required() {
        for field in ["id", "broadcaster_id", "creator_name", "view_count", "created_at"] {
            let mut payload = clip();
            payload.as_object_mut().unwrap().remove(field);
            let err = Clip::from_payload(&HelixHttp::detached(), &payload).unwrap_err();
            assert_eq!(err.missing_field(), Some(field));
        }
    }

    #[test]
    fn non_numeric_broadcaster_id() {
        let mut payload = clip();
        payload["broadcaster_id"] = json!("chewie");
        let err = Clip::from_payload(&HelixHttp::detached(), &payload).unwrap_err();
        assert!(matches!(err, PayloadError::Coercion { record: "Clip", .. }), "{err:?}");
    }
}
