//! Channel stream schedules.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A broadcaster's schedule.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-channel-stream-schedule>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// Scheduled broadcasts in the order Helix lists them.
    pub segments: Vec<ScheduleSegment>,
    /// The broadcaster.
    pub user: PartialUser,
    pub vacation: Option<ScheduleVacation>,
}

/// One scheduled broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSegment {
    pub id: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub start_time: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    pub end_time: Timestamp,
    pub title: String,
    /// When a canceled occurrence of a recurring segment resumes.
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub canceled_until: Option<Timestamp>,
    #[serde(default)]
    pub category: Option<ScheduleCategory>,
    pub is_recurring: bool,
}

/// The game or category of a [`ScheduleSegment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCategory {
    pub id: String,
    pub name: String,
}

/// A break during which no segments air.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleVacation {
    #[serde(deserialize_with = "de::timestamp")]
    pub start_time: Timestamp,
    #[serde(deserialize_with = "de::timestamp")]
    pub end_time: Timestamp,
}

#[derive(Deserialize)]
struct RawScheduleEnvelope {
    data: RawSchedule,
}

#[derive(Deserialize)]
struct RawSchedule {
    #[serde(deserialize_with = "de::null_as_empty")]
    segments: Vec<ScheduleSegment>,
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_login: String,
    #[serde(default)]
    vacation: Option<ScheduleVacation>,
}

impl Schedule {
    /// Builds from the whole response body, including the `data` envelope.
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawScheduleEnvelope = decode("Schedule", payload)?;
        let data = raw.data;
        Ok(Self {
            segments: data.segments,
            user: PartialUser::new(http, data.broadcaster_id, Some(data.broadcaster_login)),
            vacation: data.vacation,
        })
    }
}

impl ScheduleSegment {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("ScheduleSegment", payload)
    }
}

impl ScheduleCategory {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("ScheduleCategory", payload)
    }
}

impl ScheduleVacation {
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        decode("ScheduleVacation", payload)
    }
}
