//! Channel Points predictions.

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use crate::helix_api::users::PartialUser;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    /// Still accepting predictions.
    Active,
    /// Paid out to the winning outcome.
    Resolved,
    /// Refunded.
    Canceled,
    /// No longer accepting predictions, awaiting a result.
    Locked,
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Resolved => write!(f, "RESOLVED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Locked => write!(f, "LOCKED"),
        }
    }
}

/// A prediction.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-predictions>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The broadcaster running the prediction.
    pub user: PartialUser,
    pub id: String,
    pub title: String,
    /// Set once the prediction is resolved.
    pub winning_outcome_id: Option<String>,
    pub outcomes: Vec<PredictionOutcome>,
    /// How long the prediction accepts entries, in seconds.
    pub prediction_window: u32,
    pub status: PredictionStatus,
    pub created_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub locked_at: Option<Timestamp>,
}

/// One possible outcome of a [`Prediction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub id: String,
    pub title: String,
    /// Channel Points wagered on this outcome.
    pub channel_points: u64,
    /// `BLUE` or `PINK`.
    pub color: String,
    /// Number of users who picked this outcome.
    pub users: u64,
    /// Up to ten biggest predictors; `None` until someone predicts.
    pub top_predictors: Option<Vec<Predictor>>,
}

/// A user who wagered on a [`PredictionOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predictor {
    pub channel_points_used: u64,
    /// Set once the prediction is resolved.
    pub channel_points_won: Option<u64>,
    pub user: PartialUser,
}

#[derive(Deserialize)]
struct RawPrediction {
    id: String,
    #[serde(deserialize_with = "de::numeric_id")]
    broadcaster_id: u64,
    broadcaster_name: String,
    title: String,
    #[serde(default)]
    winning_outcome_id: Option<String>,
    outcomes: Vec<RawOutcome>,
    prediction_window: u32,
    status: PredictionStatus,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    ended_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    locked_at: Option<Timestamp>,
}

#[derive(Deserialize)]
struct RawOutcome {
    id: String,
    title: String,
    channel_points: u64,
    color: String,
    users: u64,
    #[serde(default, deserialize_with = "de::non_empty_list")]
    top_predictors: Option<Vec<RawPredictor>>,
}

#[derive(Deserialize)]
struct RawPredictor {
    channel_points_used: u64,
    #[serde(default)]
    channel_points_won: Option<u64>,
    user: RawPredictorUser,
}

#[derive(Deserialize)]
struct RawPredictorUser {
    #[serde(deserialize_with = "de::numeric_id")]
    id: u64,
    name: String,
}

impl RawPredictor {
    fn build(self, http: &HelixHttp) -> Predictor {
        Predictor {
            channel_points_used: self.channel_points_used,
            channel_points_won: self.channel_points_won,
            user: PartialUser::new(http, self.user.id, Some(self.user.name)),
        }
    }
}

impl RawOutcome {
    fn build(self, http: &HelixHttp) -> PredictionOutcome {
        PredictionOutcome {
            id: self.id,
            title: self.title,
            channel_points: self.channel_points,
            color: self.color,
            users: self.users,
            top_predictors: self
                .top_predictors
                .map(|list| list.into_iter().map(|p| p.build(http)).collect()),
        }
    }
}

impl Prediction {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawPrediction = decode("Prediction", payload)?;
        Ok(Self {
            user: PartialUser::new(http, raw.broadcaster_id, Some(raw.broadcaster_name)),
            id: raw.id,
            title: raw.title,
            winning_outcome_id: raw.winning_outcome_id.filter(|id| !id.is_empty()),
            outcomes: raw.outcomes.into_iter().map(|o| o.build(http)).collect(),
            prediction_window: raw.prediction_window,
            status: raw.status,
            created_at: raw.created_at,
            ended_at: raw.ended_at,
            locked_at: raw.locked_at,
        })
    }
}

impl PredictionOutcome {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawOutcome = decode("PredictionOutcome", payload)?;
        Ok(raw.build(http))
    }

    pub fn colour(&self) -> &str {
        &self.color
    }
}

impl Predictor {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let raw: RawPredictor = decode("Predictor", payload)?;
        Ok(raw.build(http))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn prediction() -> Value {
        json!({
            "id": "d6676d5c-c86e-44d2-bfc4-100fb48f0656",
            "broadcaster_id": "55696719",
            "broadcaster_name": "TwitchDev",
            "broadcaster_login": "twitchdev",
            "title": "Will there be any leaks today?",
            "winning_outcome_id": null,
            "outcomes": [
                {
                    "id": "021e9234-5893-49b4-982e-cfe9a0aaddd9",
                    "title": "Yes",
                    "users": 1,
                    "channel_points": 500,
                    "top_predictors": [
                        {
                            "user": { "id": "1234", "name": "someone" },
                            "channel_points_used": 500,
                            "channel_points_won": null
                        }
                    ],
                    "color": "BLUE"
                },
                {
                    "id": "ded84c26-13cb-4b48-8cb5-5bae3ec3a66e",
                    "title": "No",
                    "users": 0,
                    "channel_points": 0,
                    "top_predictors": null,
                    "color": "PINK"
                }
            ],
            "prediction_window": 600,
            "status": "ACTIVE",
            "created_at": "2021-04-28T16:03:06.320848689Z",
            "ended_at": null,
            "locked_at": null
        })
    }

    #[test]
    fn active_prediction() {
        let http = HelixHttp::detached();
        let prediction = Prediction::from_payload(&http, &prediction()).unwrap();
        assert_eq!(prediction.status, PredictionStatus::Active);
        assert_eq!(prediction.winning_outcome_id, None);
        assert_eq!(prediction.user.id, 55696719);
        assert_eq!(
            prediction.created_at.map(|t| t.to_string()).as_deref(),
            Some("2021-04-28T16:03:06Z")
        );
        assert_eq!(prediction.ended_at, None);
        assert_eq!(prediction.locked_at, None);

        let [yes, no] = &prediction.outcomes[..] else {
            panic!("expected two outcomes, got {:?}", prediction.outcomes);
        };
        assert_eq!(yes.colour(), "BLUE");
        assert_eq!(
            yes.top_predictors,
            Some(vec![Predictor {
                channel_points_used: 500,
                channel_points_won: None,
                user: PartialUser::new(&http, 1234, Some("someone".into())),
            }])
        );
        assert_eq!(no.top_predictors, None);
    }

    #[test]
    fn empty_predictor_list_is_none() {
        let outcome = PredictionOutcome::from_payload(
            &HelixHttp::detached(),
            &json!({
                "id": "1",
                "title": "No",
                "users": 0,
                "channel_points": 0,
                "top_predictors": [],
                "color": "PINK"
            }),
        )
        .unwrap();
        assert_eq!(outcome.top_predictors, None);
    }

    #[test]
    fn resolved_prediction() {
        let mut payload = prediction();
        payload["status"] = json!("RESOLVED");
        payload["winning_outcome_id"] = json!("021e9234-5893-49b4-982e-cfe9a0aaddd9");
        payload["ended_at"] = json!("2021-04-28T16:13:06Z");
        payload["locked_at"] = json!("2021-04-28T16:13:00Z");
        payload["outcomes"][0]["top_predictors"][0]["channel_points_won"] = json!(1000);

        let prediction = Prediction::from_payload(&HelixHttp::detached(), &payload).unwrap();
        assert_eq!(prediction.status.to_string(), "RESOLVED");
        assert_eq!(
            prediction.winning_outcome_id.as_deref(),
            Some("021e9234-5893-49b4-982e-cfe9a0aaddd9")
        );
        let winner = &prediction.outcomes[0].top_predictors.as_ref().unwrap()[0];
        assert_eq!(winner.channel_points_won, Some(1000));
    }

    #[test]
    fn predictor_without_user() {
        let err = Predictor::from_payload(
            &HelixHttp::detached(),
            &json!({ "channel_points_used": 1 }),
        )
        .unwrap_err();
        assert_eq!(err.missing_field(), Some("user"));
    }
}
