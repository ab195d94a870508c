//! Bits leaderboards and cheermotes.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A channel's Bits leaderboard.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-bits-leaderboard>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitsLeaderboard {
    /// Start of the leaderboard period; `None` for the all-time leaderboard.
    pub started_at: Option<Timestamp>,
    /// End of the leaderboard period; `None` for the all-time leaderboard.
    pub ended_at: Option<Timestamp>,
    /// Leaders in rank order.
    pub leaders: Vec<BitLeaderboardUser>,
}

/// One ranked entry on a [`BitsLeaderboard`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitLeaderboardUser {
    pub user: PartialUser,
    pub rank: u32,
    /// Bits the user has cheered in the leaderboard period.
    pub score: u64,
}

#[derive(Deserialize)]
struct RawBitsLeaderboard {
    date_range: RawDateRange,
    data: Vec<RawLeader>,
}

#[derive(Deserialize)]
struct RawDateRange {
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    started_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    ended_at: Option<Timestamp>,
}

#[derive(Deserialize)]
struct RawLeader {
    #[serde(deserialize_with = "de::numeric_id")]
    user_id: u64,
    user_name: String,
    rank: u32,
    score: u64,
}

impl RawLeader {
    fn build(self, http: &HelixHttp) -> BitLeaderboardUser {
        BitLeaderboardUser {
            user: PartialUser::new(http, self.user_id, Some(self.user_name)),
            rank: self.rank,
            score: self.score,
        }
    }
}

impl BitsLeaderboard {
    /// Builds the leaderboard from the whole response body (`data` plus `date_range`).
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawBitsLeaderboard = decode("BitsLeaderboard", payload)?;
        Ok(Self {
            started_at: raw.date_range.started_at,
            ended_at: raw.date_range.ended_at,
            leaders: raw.data.into_iter().map(|l| l.build(http)).collect(),
        })
    }
}

impl BitLeaderboardUser {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawLeader = decode("BitLeaderboardUser", payload)?;
        Ok(raw.build(http))
    }
}

/// Where a cheermote comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheermoteType {
    /// A Twitch-defined cheermote shown in the Bits card.
    GlobalFirstParty,
    /// A Twitch-defined cheermote not shown in the Bits card.
    GlobalThirdParty,
    /// A broadcaster-defined cheermote.
    ChannelCustom,
    /// Shown only in the Bits card, not available for cheering.
    DisplayOnly,
    /// A sponsor-defined cheermote.
    Sponsored,
}

impl fmt::Display for CheermoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalFirstParty => write!(f, "global_first_party"),
            Self::GlobalThirdParty => write!(f, "global_third_party"),
            Self::ChannelCustom => write!(f, "channel_custom"),
            Self::DisplayOnly => write!(f, "display_only"),
            Self::Sponsored => write!(f, "sponsored"),
        }
    }
}

/// A cheermote and its tiers.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-cheermotes>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheerEmote {
    /// The text that precedes the Bits amount when cheering, e.g. `Cheer` in `Cheer100`.
    pub prefix: String,
    /// Tiers in ascending order of minimum Bits.
    pub tiers: Vec<CheerEmoteTier>,
    #[serde(rename = "type")]
    pub kind: CheermoteType,
    /// Position of this cheermote in the Bits card.
    pub order: u32,
    #[serde(deserialize_with = "de::timestamp")]
    pub last_updated: Timestamp,
    #[serde(rename = "is_charitable")]
    pub charitable: bool,
}

impl CheerEmote {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("CheerEmote", payload)
    }
}

/// One tier of a [`CheerEmote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheerEmoteTier {
    /// The minimum Bits needed for this tier.
    pub min_bits: u32,
    pub id: String,
    /// Hex color, e.g. `#9c3ee8`.
    #[serde(alias = "colour")]
    pub color: String,
    pub images: CheermoteImages,
    /// Whether users can cheer at this tier.
    pub can_cheer: bool,
    /// Whether Twitch shows this tier in the Bits card.
    pub show_in_bits_card: bool,
}

impl CheerEmoteTier {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("CheerEmoteTier", payload)
    }

    pub fn colour(&self) -> &str {
        &self.color
    }
}

/// Image URLs for a tier, per theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheermoteImages {
    pub light: CheermoteThemeImages,
    pub dark: CheermoteThemeImages,
}

/// Image URLs for one theme, keyed by scale (`"1"`, `"1.5"`, `"2"`, `"3"`, `"4"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheermoteThemeImages {
    pub animated: BTreeMap<String, String>,
    #[serde(rename = "static")]
    pub still: BTreeMap<String, String>,
}
