//! Mock remote for testing.
//!
//! Allows seeding listed posts, failing specific posts on create, and
//! scripting probe answers, while counting every call.

use super::{PostRemote, ReachabilityProbe, RemoteError, RemotePost};
use async_trait::async_trait;
use plushie_types::{ExtendedPost, PostId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock remote for testing.
///
/// Clones share state, so a test can keep a handle for assertions while the
/// code under test owns another.
#[derive(Debug, Default, Clone)]
pub struct MockRemote {
    inner: Arc<Mutex<MockRemoteInner>>,
}

#[derive(Debug, Default)]
struct MockRemoteInner {
    listed: Vec<RemotePost>,
    created: Vec<ExtendedPost>,
    reject_ids: HashSet<PostId>,
    fail_next_fetch: Option<String>,
    reachable: bool,
    probe_error: Option<String>,
    probe_calls: usize,
    create_calls: usize,
}

impl MockRemote {
    /// Create a new mock remote. It starts unreachable with no posts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post to what `fetch_posts()` returns.
    pub fn list_post(&self, post: RemotePost) {
        self.lock().listed.push(post);
    }

    /// Cause every `create_post()` for `id` to fail.
    pub fn reject_post(&self, id: &PostId) {
        self.lock().reject_ids.insert(id.clone());
    }

    /// Cause the next `fetch_posts()` to fail with the given error.
    pub fn fail_next_fetch(&self, error: &str) {
        self.lock().fail_next_fetch = Some(error.to_string());
    }

    /// Set what `probe()` answers.
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Make `probe()` fail with the given error until cleared with `None`.
    pub fn set_probe_error(&self, error: Option<&str>) {
        self.lock().probe_error = error.map(str::to_string);
    }

    /// Posts accepted by `create_post()`, in order.
    pub fn created(&self) -> Vec<ExtendedPost> {
        self.lock().created.clone()
    }

    /// Number of `probe()` calls so far.
    pub fn probe_calls(&self) -> usize {
        self.lock().probe_calls
    }

    /// Number of `create_post()` calls so far, failed ones included.
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    fn lock(&self) -> MutexGuard<'_, MockRemoteInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PostRemote for MockRemote {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>, RemoteError> {
        let mut inner = self.lock();

        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(RemoteError::Unavailable(error));
        }

        Ok(inner.listed.clone())
    }

    async fn create_post(&self, post: &ExtendedPost) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.create_calls += 1;

        if inner.reject_ids.contains(&post.id) {
            return Err(RemoteError::Rejected {
                id: post.id.clone(),
                reason: "rejected by mock".to_string(),
            });
        }

        inner.created.push(post.clone());
        Ok(())
    }
}

#[async_trait]
impl ReachabilityProbe for MockRemote {
    async fn probe(&self) -> Result<bool, RemoteError> {
        let mut inner = self.lock();
        inner.probe_calls += 1;

        match &inner.probe_error {
            Some(error) => Err(RemoteError::Unavailable(error.clone())),
            None => Ok(inner.reachable),
        }
    }
}
