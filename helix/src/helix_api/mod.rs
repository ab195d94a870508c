//! Typed records for Twitch Helix API responses.
//!
//! Each record is built from one raw JSON payload with a `from_payload` constructor. Building a
//! record never performs I/O: nested records are built from the same payload, and users that
//! the payload only names by id become [`PartialUser`] placeholders. Callers that already hold
//! a full [`User`] can hand it in instead, and the record keeps it as a [`UserRef::Resolved`].
//!
//! # Placeholders and the transport
//!
//! Records that may need to reach Helix later (to resolve a placeholder, or to delete a video)
//! keep a clone of the [`HelixHttp`] handle they were built with. The handle wraps whatever
//! [`HelixTransport`] the application provides. For decoding stored payloads offline, use
//! [`HelixHttp::detached`].
//!
//! # Example
//!
//! ```rust
//! use twitch_helix_models::helix_api::{Game, HelixHttp, SubscriptionEvent};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), twitch_helix_models::PayloadError> {
//! let game = Game::from_payload(&json!({
//!     "id": "33214",
//!     "name": "Fortnite",
//!     "box_art_url": "https://static-cdn.jtvnw.net/ttv-boxart/Fortnite-{width}x{height}.jpg"
//! }))?;
//! assert_eq!(game.art_url(52, 72), "https://static-cdn.jtvnw.net/ttv-boxart/Fortnite-52x72.jpg");
//!
//! let http = HelixHttp::detached();
//! let sub = SubscriptionEvent::from_payload(
//!     &http,
//!     &json!({
//!         "broadcaster_id": "141981764",
//!         "broadcaster_name": "TwitchDev",
//!         "user_id": "527115020",
//!         "user_name": "twitchgaming",
//!         "tier": "2000",
//!         "plan_name": "Channel Subscription (twitchdev)",
//!         "is_gift": false
//!     }),
//!     None,
//!     None,
//! )?;
//! assert_eq!(sub.tier, 2);
//! assert_eq!(sub.user.to_string(), "twitchgaming (527115020)");
//! # Ok(())
//! # }
//! ```

pub mod automod;
pub mod bits;
pub mod client;
pub mod clips;
mod de;
pub mod extensions;
pub mod follows;
pub mod games;
pub mod hype_train;
pub mod markers;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod moderation;
pub mod predictions;
pub mod schedule;
pub mod streams;
pub mod subscriptions;
pub mod tags;
pub mod teams;
pub mod types;
pub mod users;
pub mod videos;
pub mod webhooks;

pub use client::{HelixHttp, HelixTransport};
pub use types::{BoxFuture, decode_tier, expand_dimensions, parse_timestamp};

pub use users::{BroadcasterType, PartialUser, SearchUser, User, UserRef, UserType};

pub use automod::{AutomodCheckMessage, AutomodCheckResponse};
pub use bits::{
    BitLeaderboardUser, BitsLeaderboard, CheerEmote, CheerEmoteTier, CheermoteImages,
    CheermoteThemeImages, CheermoteType,
};
pub use clips::Clip;
pub use extensions::{
    ActiveExtension, ActiveExtensions, AvailableExtension, Extension, ExtensionBuilder,
    ExtensionType, ExtensionUpdate,
};
pub use follows::FollowEvent;
pub use games::Game;
pub use hype_train::{ContributionType, HypeTrainContribution, HypeTrainEvent};
pub use markers::{Marker, VideoMarkers};
pub use moderation::{BanEvent, BanEventType, ModEvent, ModEventType, UserBan};
pub use predictions::{Prediction, PredictionOutcome, PredictionStatus, Predictor};
pub use schedule::{Schedule, ScheduleCategory, ScheduleSegment, ScheduleVacation};
pub use streams::{ChannelInfo, Stream};
pub use subscriptions::SubscriptionEvent;
pub use tags::Tag;
pub use teams::{ChannelTeam, Team, TeamDetails};
pub use videos::{Video, VideoType};
pub use webhooks::WebhookSubscription;
