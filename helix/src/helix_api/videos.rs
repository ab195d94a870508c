//! Videos (VODs, highlights and uploads).

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::types::expand_dimensions;
use crate::helix_api::users::UserRef;
use eyre::Context;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    /// A past broadcast.
    Archive,
    Highlight,
    Upload,
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive => write!(f, "archive"),
            Self::Highlight => write!(f, "highlight"),
            Self::Upload => write!(f, "upload"),
        }
    }
}

/// A video.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-videos>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub id: u64,
    /// The owner.
    pub user: UserRef,
    /// The broadcast this video was recorded from, for archives only.
    pub stream_id: Option<String>,
    pub title: String,
    pub description: String,
    pub created_at: Timestamp,
    pub published_at: Timestamp,
    pub url: String,
    /// Template URL; see [`Video::thumbnail`].
    pub thumbnail_url: String,
    /// `public` or `private`.
    pub viewable: String,
    pub view_count: u64,
    pub language: String,
    pub kind: VideoType,
    /// Length in Helix's `1h2m3s` form; see [`Video::duration_parsed`].
    pub duration: String,
    #[serde(skip)]
    http: HelixHttp,
}

#[derive(Deserialize)]
struct RawVideo {
    #[serde(deserialize_with = "de::numeric_id")]
    id: u64,
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
    #[serde(default)]
    stream_id: Option<String>,
    title: String,
    description: String,
    #[serde(deserialize_with = "de::timestamp")]
    created_at: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    published_at: Timestamp,
    url: String,
    thumbnail_url: String,
    viewable: String,
    view_count: u64,
    language: String,
    #[serde(rename = "type")]
    kind: VideoType,
    duration: String,
}

impl Video {
    /// Builds the video, keeping `user` if the caller already holds the owner.
    pub fn from_payload(
        http: &HelixHttp,
        payload: &Value,
        user: Option<UserRef>,
    ) -> Result<Self, PayloadError> {
        let raw: RawVideo = decode("Video", payload)?;
        Ok(Self {
            id: raw.id,
            user: UserRef::supplied_or(user, http, raw.user_id, Some(raw.user_name)),
            stream_id: raw.stream_id.filter(|id| !id.is_empty()),
            title: raw.title,
            description: raw.description,
            created_at: raw.created_at,
            published_at: raw.published_at,
            url: raw.url,
            thumbnail_url: raw.thumbnail_url,
            viewable: raw.viewable,
            view_count: raw.view_count,
            language: raw.language,
            kind: raw.kind,
            duration: raw.duration,
            http: http.clone(),
        })
    }

    /// The thumbnail URL at the given size.
    ///
    /// Video templates use `%{width}`/`%{height}`, unlike most of Helix.
    pub fn thumbnail(&self, width: u32, height: u32) -> String {
        let template = self
            .thumbnail_url
            .replace("%{width}", "{width}")
            .replace("%{height}", "{height}");
        expand_dimensions(&template, width, height)
    }

    /// The length of the video.
    pub fn duration_parsed(&self) -> Result<SignedDuration, jiff::Error> {
        self.duration.parse()
    }

    /// Deletes this video. The token needs the `channel:manage:videos` scope.
    #[instrument(skip(self, token), fields(id = self.id))]
    pub async fn delete(&self, token: &str) -> eyre::Result<()> {
        self.http
            .delete_videos(token, &[self.id.to_string()])
            .await
            .with_context(|| format!("delete video {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helix_api::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn video() -> Value {
        json!({
            "id": "335921245",
            "stream_id": null,
            "user_id": "141981764",
            "user_login": "twitchdev",
            "user_name": "TwitchDev",
            "title": "Twitch Developers 101",
            "description": "Welcome to Twitch development!",
            "created_at": "2018-11-14T21:30:18Z",
            "published_at": "2018-11-14T22:04:30Z",
            "url": "https://www.twitch.tv/videos/335921245",
            "thumbnail_url": "https://static-cdn.jtvnw.net/cf_vods/d2nvs31859zcd8/twitchdev/335921245/ce0f3a7f-57a3-4152-bc06-0c6610189fb3/thumb/index-0000000000-%{width}x%{height}.jpg",
            "viewable": "public",
            "view_count": 1863062,
            "language": "en",
            "type": "upload",
            "duration": "3m21s",
            "muted_segments": null
        })
    }

    #[test]
    fn video_from_payload() {
        let video = Video::from_payload(&HelixHttp::detached(), &video(), None).unwrap();
        assert_eq!(video.id, 335921245);
        assert_eq!(video.kind, VideoType::Upload);
        assert_eq!(video.stream_id, None);
        assert_eq!(video.user.to_string(), "TwitchDev (141981764)");
        assert_eq!(
            video.thumbnail(320, 180),
            "https://static-cdn.jtvnw.net/cf_vods/d2nvs31859zcd8/twitchdev/335921245/ce0f3a7f-57a3-4152-bc06-0c6610189fb3/thumb/index-0000000000-320x180.jpg"
        );
        assert_eq!(video.duration_parsed().unwrap(), SignedDuration::from_secs(201));
    }

    #[test]
    fn long_durations() {
        let mut payload = video();
        payload["duration"] = json!("3h8m33s");
        let video = Video::from_payload(&HelixHttp::detached(), &payload, None).unwrap();
        assert_eq!(video.duration_parsed().unwrap(), SignedDuration::from_secs(11313));

        payload["duration"] = json!("forever");
        let video = Video::from_payload(&HelixHttp::detached(), &payload, None).unwrap();
        assert!(video.duration_parsed().is_err());
    }

    #[test]
    fn video_id_is_numeric() {
        let mut payload = video();
        payload["id"] = json!("v335921245");
        let err = Video::from_payload(&HelixHttp::detached(), &payload, None).unwrap_err();
        assert!(matches!(err, PayloadError::Coercion { record: "Video", .. }), "{err:?}");
    }

    #[tokio::test]
    async fn delete_sends_id_as_string() {
        let mock = MockTransport::new();
        let http = HelixHttp::new(mock.clone());
        let video = Video::from_payload(&http, &video(), None).unwrap();

        video.delete("token").await.unwrap();
        assert_eq!(mock.deleted_videos().await, vec!["335921245".to_owned()]);
    }

    #[tokio::test]
    async fn delete_without_transport() {
        let video = Video::from_payload(&HelixHttp::detached(), &video(), None).unwrap();
        let err = video.delete("token").await.unwrap_err();
        assert!(format!("{err:#}").starts_with("delete video 335921245"), "{err:#}");
    }
}
