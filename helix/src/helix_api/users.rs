//! Twitch users and the references other records hold to them.
//!
//! Most Helix payloads identify a user only by an inline id and login. Those become a
//! [`PartialUser`], a placeholder that can fetch the full [`User`] on demand. When the caller
//! already holds the full profile it can pass it in, and the record keeps that instead. The
//! two cases are unified by [`UserRef`].

use crate::error::{PayloadError, decode};
use crate::helix_api::client::HelixHttp;
use crate::helix_api::de;
use eyre::Context;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// A user known only by id and (usually) login name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialUser {
    /// The user's id.
    pub id: u64,
    /// The user's login name.
    ///
    /// A few payloads only carry the id, in which case this is `None`.
    pub name: Option<String>,
    #[serde(skip)]
    http: HelixHttp,
}

impl PartialUser {
    pub fn new(http: &HelixHttp, id: u64, name: Option<String>) -> Self {
        Self {
            id,
            name,
            http: http.clone(),
        }
    }

    /// Fetches the full profile for this user.
    ///
    /// With `force` unset the transport may answer from its cache.
    #[instrument(skip(self, token), fields(id = self.id))]
    pub async fn fetch(&self, token: Option<&str>, force: bool) -> eyre::Result<User> {
        let users = self
            .http
            .fetch_users(&[self.id], token, force)
            .await
            .with_context(|| format!("fetch user {}", self.id))?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| eyre::eyre!("Helix returned no user with id {}", self.id))
    }
}

impl fmt::Display for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A user's type.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-users>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// A regular user.
    #[default]
    #[serde(rename = "")]
    None,
    Admin,
    GlobalMod,
    Staff,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Admin => write!(f, "admin"),
            Self::GlobalMod => write!(f, "global_mod"),
            Self::Staff => write!(f, "staff"),
        }
    }
}

/// A broadcaster's program membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcasterType {
    /// A normal broadcaster.
    #[default]
    #[serde(rename = "")]
    None,
    Affiliate,
    Partner,
}

impl fmt::Display for BroadcasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Affiliate => write!(f, "affiliate"),
            Self::Partner => write!(f, "partner"),
        }
    }
}

/// A full user profile, as returned by `GET /helix/users`.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#get-users>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's id.
    #[serde(deserialize_with = "de::numeric_id")]
    pub id: u64,
    /// The user's login name.
    pub login: String,
    /// The user's display name; usually `login` with different capitalization.
    pub display_name: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub broadcaster_type: BroadcasterType,
    /// The user's bio.
    pub description: String,
    pub profile_image_url: String,
    pub offline_image_url: String,
    /// Deprecated by Twitch and no longer updated; zero when omitted.
    #[serde(default)]
    pub view_count: u64,
    /// When the account was created.
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: Timestamp,
    /// Only present when the token carries the `user:read:email` scope.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(skip)]
    http: HelixHttp,
}

impl User {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let mut user: Self = decode("User", payload)?;
        user.http = http.clone();
        Ok(user)
    }

    /// A placeholder reference to this user sharing the same handle.
    pub fn as_partial(&self) -> PartialUser {
        PartialUser::new(&self.http, self.id, Some(self.login.clone()))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// A reference to a user that is either fully resolved or a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserRef {
    /// A full profile the caller supplied.
    Resolved(Arc<User>),
    /// A placeholder built from ids found in the payload.
    Partial(PartialUser),
}

impl UserRef {
    /// Prefer the caller-supplied reference; otherwise build a placeholder.
    pub(crate) fn supplied_or(
        supplied: Option<UserRef>,
        http: &HelixHttp,
        id: u64,
        name: Option<String>,
    ) -> Self {
        supplied.unwrap_or_else(|| Self::Partial(PartialUser::new(http, id, name)))
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Resolved(user) => user.id,
            Self::Partial(user) => user.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Resolved(user) => Some(&user.login),
            Self::Partial(user) => user.name.as_deref(),
        }
    }

    /// The full profile, if this reference is already resolved.
    pub fn resolved(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => Some(user),
            Self::Partial(_) => None,
        }
    }

    /// Returns the full profile, fetching it only if this is a placeholder.
    pub async fn fetch(&self, token: Option<&str>) -> eyre::Result<Arc<User>> {
        match self {
            Self::Resolved(user) => Ok(Arc::clone(user)),
            Self::Partial(user) => user.fetch(token, false).await.map(Arc::new),
        }
    }
}

impl From<User> for UserRef {
    fn from(user: User) -> Self {
        Self::Resolved(Arc::new(user))
    }
}

impl From<Arc<User>> for UserRef {
    fn from(user: Arc<User>) -> Self {
        Self::Resolved(user)
    }
}

impl From<PartialUser> for UserRef {
    fn from(user: PartialUser) -> Self {
        Self::Partial(user)
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(user) => fmt::Display::fmt(user.as_ref(), f),
            Self::Partial(user) => fmt::Display::fmt(user, f),
        }
    }
}

/// A channel returned by `GET /helix/search/channels`.
///
/// See: <https://dev.twitch.tv/docs/api/reference/#search-channels>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchUser {
    #[serde(deserialize_with = "de::numeric_id")]
    pub id: u64,
    #[serde(rename = "broadcaster_login")]
    pub login: String,
    pub display_name: String,
    /// The game or category the channel last streamed under.
    pub game_id: String,
    pub title: String,
    pub thumbnail_url: String,
    #[serde(rename = "broadcaster_language")]
    pub language: String,
    #[serde(rename = "is_live")]
    pub live: bool,
    /// When the current stream started; `None` while offline.
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub started_at: Option<Timestamp>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(skip)]
    http: HelixHttp,
}

impl SearchUser {
    pub fn from_payload(http: &HelixHttp, payload: &Value) -> Result<Self, PayloadError> {
        let mut user: Self = decode("SearchUser", payload)?;
        user.http = http.clone();
        if !user.live {
            user.started_at = None;
        }
        Ok(user)
    }

    pub fn as_partial(&self) -> PartialUser {
        PartialUser::new(&self.http, self.id, Some(self.login.clone()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::helix_api::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn twitchdev() -> Value {
        json!({
            "id": "141981764",
            "login": "twitchdev",
            "display_name": "TwitchDev",
            "type": "",
            "broadcaster_type": "partner",
            "description": "Supporting third-party developers building Twitch integrations",
            "profile_image_url": "https://static-cdn.jtvnw.net/profile.png",
            "offline_image_url": "https://static-cdn.jtvnw.net/offline.png",
            "view_count": 5980557,
            "email": "not-real@email.com",
            "created_at": "2016-12-14T20:32:28Z"
        })
    }

    #[test]
    fn user_from_payload() {
        let http = HelixHttp::detached();
        let user = User::from_payload(&http, &twitchdev()).unwrap();
        assert_eq!(user.id, 141981764);
        assert_eq!(user.login, "twitchdev");
        assert_eq!(user.user_type, UserType::None);
        assert_eq!(user.broadcaster_type, BroadcasterType::Partner);
        assert_eq!(user.view_count, 5980557);
        assert_eq!(user.email.as_deref(), Some("not-real@email.com"));
        assert_eq!(user.created_at.to_string(), "2016-12-14T20:32:28Z");
        assert_eq!(user.to_string(), "TwitchDev (141981764)");
    }

    #[test]
    fn user_optional_fields() {
        let mut payload = twitchdev();
        let object = payload.as_object_mut().unwrap();
        object.remove("email");
        object.remove("view_count");

        let user = User::from_payload(&HelixHttp::detached(), &payload).unwrap();
        assert_eq!(user.email, None);
        assert_eq!(user.view_count, 0);
    }

    #[test]
    fn user_missing_login() {
        let mut payload = twitchdev();
        payload.as_object_mut().unwrap().remove("login");
        let err = User::from_payload(&HelixHttp::detached(), &payload).unwrap_err();
        assert_eq!(err.missing_field(), Some("login"));
    }

    #[test]
    fn unknown_user_type_is_a_coercion_error() {
        let mut payload = twitchdev();
        payload["type"] = json!("wizard");
        let err = User::from_payload(&HelixHttp::detached(), &payload).unwrap_err();
        assert!(matches!(err, PayloadError::Coercion { .. }), "{err:?}");
    }

    #[test]
    fn partial_user_display() {
        let http = HelixHttp::detached();
        assert_eq!(
            PartialUser::new(&http, 12, Some("someone".into())).to_string(),
            "someone (12)"
        );
        assert_eq!(PartialUser::new(&http, 12, None).to_string(), "12");
    }

    #[tokio::test]
    async fn placeholder_resolves_lazily() {
        let mock = MockTransport::new().with_user(141981764, twitchdev());
        let http = HelixHttp::new(mock.clone());

        let placeholder = UserRef::supplied_or(None, &http, 141981764, None);
        assert_eq!(placeholder.name(), None);
        assert!(placeholder.resolved().is_none());
        assert!(mock.user_requests().await.is_empty());

        let user = placeholder.fetch(None).await.unwrap();
        assert_eq!(user.display_name, "TwitchDev");
        assert_eq!(mock.user_requests().await, vec![vec![141981764]]);
    }

    #[tokio::test]
    async fn resolved_reference_never_fetches() {
        let mock = MockTransport::new();
        let http = HelixHttp::new(mock.clone());
        let user = User::from_payload(&http, &twitchdev()).unwrap();

        let supplied = UserRef::from(user);
        let reference = UserRef::supplied_or(Some(supplied.clone()), &http, 1, None);
        assert_eq!(reference, supplied);
        assert_eq!(reference.name(), Some("twitchdev"));

        let fetched = reference.fetch(None).await.unwrap();
        assert_eq!(fetched.id, 141981764);
        assert!(mock.user_requests().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_unknown_user_fails() {
        let http = HelixHttp::new(MockTransport::new());
        let err = PartialUser::new(&http, 99, None)
            .fetch(None, true)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("fetch user 99"), "{err:#}");
    }

    #[test]
    fn as_partial_keeps_identity() {
        let http = HelixHttp::detached();
        let user = User::from_payload(&http, &twitchdev()).unwrap();
        let partial = user.as_partial();
        assert_eq!(partial, PartialUser::new(&http, 141981764, Some("twitchdev".into())));
    }

    #[test]
    fn search_user_offline_has_no_start() {
        let payload = json!({
            "broadcaster_language": "en",
            "broadcaster_login": "loserfruit",
            "display_name": "Loserfruit",
            "game_id": "498000",
            "game_name": "House Flipper",
            "id": "41245072",
            "is_live": false,
            "tag_ids": [],
            "thumbnail_url": "https://static-cdn.jtvnw.net/jtv_user_pictures/fd17325a.png",
            "title": "loserfruit",
            "started_at": ""
        });
        let user = SearchUser::from_payload(&HelixHttp::detached(), &payload).unwrap();
        assert_eq!(user.id, 41245072);
        assert!(!user.live);
        assert_eq!(user.started_at, None);
        assert_eq!(user.as_partial().name.as_deref(), Some("loserfruit"));
    }

    #[test]
    fn search_user_live_has_start() {
        let payload = json!({
            "broadcaster_language": "en",
            "broadcaster_login": "a_seagull",
            "display_name": "A_Seagull",
            "game_id": "506442",
            "id": "19070311",
            "is_live": true,
            "tag_ids": ["6ea6bca4-4712-4ab9-a906-e3336a9d8039"],
            "thumbnail_url": "https://static-cdn.jtvnw.net/jtv_user_pictures/a_seagull.png",
            "title": "a_seagull",
            "started_at": "2020-03-18T17:56:00Z"
        });
        let user = SearchUser::from_payload(&HelixHttp::detached(), &payload).unwrap();
        assert_eq!(
            user.started_at.map(|t| t.to_string()).as_deref(),
            Some("2020-03-18T17:56:00Z")
        );
        assert_eq!(user.tag_ids.len(), 1);
    }
}
