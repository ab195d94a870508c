//! The handle records use to reach back into whatever performs Helix requests.
//!
//! Records never talk to the network while they are being built. A few of them offer methods
//! that do ([`PartialUser::fetch`](crate::helix_api::users::PartialUser::fetch),
//! [`Video::delete`](crate::helix_api::videos::Video::delete)), and those go through the
//! [`HelixHttp`] handle captured at construction time. The transport behind that handle is
//! supplied by the application.

use crate::helix_api::types::BoxFuture;
use crate::helix_api::users::User;
use eyre::Context;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// The requests records may need to issue after construction.
///
/// Implementations own authentication, rate limiting and retries. Each method returns the raw
/// `data` entries of the Helix response; mapping them onto records is done by [`HelixHttp`].
pub trait HelixTransport: Send + Sync {
    /// `GET /helix/users?id=...`
    ///
    /// When `force` is false the transport may answer from a cache.
    fn get_users<'a>(
        &'a self,
        ids: &'a [u64],
        token: Option<&'a str>,
        force: bool,
    ) -> BoxFuture<'a, Vec<Value>>;

    /// `DELETE /helix/videos?id=...`
    fn delete_videos<'a>(&'a self, token: &'a str, ids: &'a [String]) -> BoxFuture<'a, ()>;
}

/// A cheap-to-clone shared handle to a [`HelixTransport`].
///
/// Two handles compare equal when they share the same transport.
#[derive(Clone)]
pub struct HelixHttp {
    transport: Arc<dyn HelixTransport>,
}

impl HelixHttp {
    pub fn new(transport: impl HelixTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn HelixTransport>) -> Self {
        Self { transport }
    }

    /// A handle with no transport behind it.
    ///
    /// Records built with it decode normally, but any method that would issue a request fails.
    /// Useful for decoding stored payloads offline.
    pub fn detached() -> Self {
        Self::new(Detached)
    }

    /// Fetches full user profiles by id.
    #[instrument(skip(self, token), level = tracing::Level::DEBUG)]
    pub async fn fetch_users(
        &self,
        ids: &[u64],
        token: Option<&str>,
        force: bool,
    ) -> eyre::Result<Vec<User>> {
        let payloads = self
            .transport
            .get_users(ids, token, force)
            .await
            .context("request users from Helix")?;

        payloads
            .iter()
            .map(|payload| User::from_payload(self, payload).context("decode Helix user"))
            .collect()
    }

    /// Deletes videos by id.
    #[instrument(skip(self, token), level = tracing::Level::DEBUG)]
    pub async fn delete_videos(&self, token: &str, ids: &[String]) -> eyre::Result<()> {
        self.transport
            .delete_videos(token, ids)
            .await
            .context("delete videos through Helix")
    }
}

impl Default for HelixHttp {
    fn default() -> Self {
        Self::detached()
    }
}

impl fmt::Debug for HelixHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelixHttp").finish_non_exhaustive()
    }
}

impl PartialEq for HelixHttp {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.transport), Arc::as_ptr(&other.transport))
    }
}

struct Detached;

impl HelixTransport for Detached {
    fn get_users<'a>(
        &'a self,
        ids: &'a [u64],
        _token: Option<&'a str>,
        _force: bool,
    ) -> BoxFuture<'a, Vec<Value>> {
        Box::pin(async move {
            Err(eyre::eyre!(
                "cannot fetch users {ids:?}: no Helix transport is attached"
            ))
        })
    }

    fn delete_videos<'a>(&'a self, _token: &'a str, ids: &'a [String]) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            Err(eyre::eyre!(
                "cannot delete videos {ids:?}: no Helix transport is attached"
            ))
        })
    }
}
