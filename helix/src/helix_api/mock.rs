//! An in-memory [`HelixTransport`] for tests.
//!
//! It serves canned user payloads and records every request it receives so that tests can
//! assert on what a record asked for.

use crate::helix_api::client::HelixTransport;
use crate::helix_api::types::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MockLog {
    user_requests: Vec<Vec<u64>>,
    deleted_videos: Vec<String>,
}

/// Canned responses and a shared request log.
///
/// Clones share the log, so keep one clone for assertions and hand the other to
/// [`HelixHttp::new`](crate::helix_api::client::HelixHttp::new).
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    users: HashMap<u64, Value>,
    log: Arc<Mutex<MockLog>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` whenever user `id` is requested.
    pub fn with_user(mut self, id: u64, payload: Value) -> Self {
        self.users.insert(id, payload);
        self
    }

    /// Every id list passed to `get_users`, in call order.
    pub async fn user_requests(&self) -> Vec<Vec<u64>> {
        self.log.lock().await.user_requests.clone()
    }

    /// Every video id passed to `delete_videos`, in call order.
    pub async fn deleted_videos(&self) -> Vec<String> {
        self.log.lock().await.deleted_videos.clone()
    }
}

impl HelixTransport for MockTransport {
    fn get_users<'a>(
        &'a self,
        ids: &'a [u64],
        _token: Option<&'a str>,
        _force: bool,
    ) -> BoxFuture<'a, Vec<Value>> {
        Box::pin(async move {
            self.log.lock().await.user_requests.push(ids.to_vec());
            tracing::debug!(?ids, "mock transport serving users");

            ids.iter()
                .map(|id| {
                    self.users
                        .get(id)
                        .cloned()
                        .ok_or_else(|| eyre::eyre!("mock transport has no user {id}"))
                })
                .collect::<eyre::Result<Vec<_>>>()
        })
    }

    fn delete_videos<'a>(&'a self, _token: &'a str, ids: &'a [String]) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.log
                .lock()
                .await
                .deleted_videos
                .extend(ids.iter().cloned());
            Ok(())
        })
    }
}
