//! Stream markers.

use crate::error::{PayloadError, decode};
use crate::helix_api::de;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point of interest in a stream or VOD.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-stream-markers>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: Timestamp,
    pub description: String,
    /// Offset into the stream, in seconds.
    pub position_seconds: u64,
    /// Link to the marker in the VOD. Only set when listing markers, not on creation.
    #[serde(rename = "URL", alias = "url", default)]
    pub url: Option<String>,
}

impl Marker {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("Marker", payload)
    }
}

/// The markers of one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMarkers {
    pub video_id: String,
    pub markers: Vec<Marker>,
}

impl VideoMarkers {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("VideoMarkers", payload)
    }
}
