//! Games and categories.

use crate::error::{PayloadError, decode};
use crate::helix_api::de;
use crate::helix_api::types::expand_dimensions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// See: <https://dev.twitch.tv/docs/api/reference/#get-games>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(deserialize_with = "de::numeric_id")]
    pub id: u64,
    pub name: String,
    /// Template URL with `{width}` and `{height}` placeholders. See [`Game::art_url`].
    pub box_art_url: String,
}

impl Game {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("Game", payload)
    }

    /// The box art URL at the given size.
    pub fn art_url(&self, width: u32, height: u32) -> String {
        expand_dimensions(&self.box_art_url, width, height)
    }
}
