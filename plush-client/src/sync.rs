//! Sync coordinator.
//!
//! Forwards queued offline posts to the remote when connectivity allows.
//! Each post is attempted independently: a failed post stays queued and the
//! rest of the batch still goes out.

use plushie_core::ConnectivityStatus;
use plushie_types::{ExtendedPost, PostId};

use crate::offline::{OfflinePostStore, StoreWarning};
use crate::remote::{PostRemote, RemoteError};
use crate::storage::KeyValueStore;

/// A post the remote did not accept.
#[derive(Debug)]
pub struct SyncFailure {
    /// Identifier of the post that stays queued.
    pub id: PostId,
    /// Why forwarding failed.
    pub error: RemoteError,
}

/// Outcome of one sync pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Identifiers of posts the remote now holds.
    pub synced: Vec<PostId>,
    /// Queue positions of the delivered posts, parallel to `synced`.
    pub delivered: Vec<usize>,
    /// Posts still awaiting sync, in queue order.
    pub remaining: Vec<ExtendedPost>,
    /// Per-post failures from this pass.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Whether nothing was left behind.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    fn skipped(queued: &[ExtendedPost]) -> Self {
        Self {
            remaining: queued.to_vec(),
            ..Self::default()
        }
    }
}

/// Forwards offline posts to a [`PostRemote`].
#[derive(Debug)]
pub struct SyncCoordinator<R: PostRemote> {
    remote: R,
}

impl<R: PostRemote> SyncCoordinator<R> {
    /// Create a coordinator for `remote`.
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    /// Forward every queued post, in order.
    ///
    /// Connectivity is not checked here; see [`Self::sync_when_online`].
    pub async fn sync(&self, queued: &[ExtendedPost]) -> SyncReport {
        let mut report = SyncReport::default();

        for (position, post) in queued.iter().enumerate() {
            match self.remote.create_post(post).await {
                Ok(()) => {
                    tracing::debug!("Synced post {}", post.id);
                    report.synced.push(post.id.clone());
                    report.delivered.push(position);
                }
                Err(error) => {
                    tracing::warn!("Failed to sync post {}: {}", post.id, error);
                    report.remaining.push(post.clone());
                    report.failures.push(SyncFailure {
                        id: post.id.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Sync pass: {} synced, {} remaining",
            report.synced.len(),
            report.remaining.len()
        );
        report
    }

    /// Forward queued posts if `status` allows, otherwise leave them all.
    pub async fn sync_when_online(
        &self,
        queued: &[ExtendedPost],
        status: &ConnectivityStatus,
    ) -> SyncReport {
        if !status.can_sync() {
            tracing::debug!("Skipping sync while {}", status.phase());
            return SyncReport::skipped(queued);
        }
        self.sync(queued).await
    }

    /// Sync the contents of `store` and drop whatever was delivered.
    ///
    /// The in-memory queue always reflects the pass. A warning is returned
    /// alongside the report if the removal could not be persisted.
    pub async fn sync_store<S: KeyValueStore>(
        &self,
        store: &mut OfflinePostStore<S>,
        status: &ConnectivityStatus,
    ) -> (SyncReport, Option<StoreWarning>) {
        let report = self.sync_when_online(store.posts(), status).await;

        // Identifiers are not unique in legacy queues.
        let warning = store.remove_positions(&report.delivered).await.err();

        (report, warning)
    }

    /// Get a reference to the remote (for testing).
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::StoreConfig;
    use crate::remote::{FileRemote, MockRemote};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn t() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn post(id: &str) -> ExtendedPost {
        ExtendedPost {
            id: PostId::new(id),
            username: "bunbun".into(),
            title: format!("queued {id}"),
            ..ExtendedPost::default()
        }
    }

    fn online() -> ConnectivityStatus {
        ConnectivityStatus {
            network_online: true,
            service_reachable: true,
            last_checked: t(),
        }
    }

    fn ids(posts: &[ExtendedPost]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn all_posts_forwarded_in_order() {
        let coordinator = SyncCoordinator::new(MockRemote::new());
        let queued = vec![post("1"), post("2")];

        let report = coordinator.sync(&queued).await;

        assert!(report.is_complete());
        assert_eq!(report.synced, vec![PostId::new("1"), PostId::new("2")]);
        assert_eq!(ids(&coordinator.remote().created()), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn middle_failure_leaves_only_that_post() {
        let remote = MockRemote::new();
        remote.reject_post(&PostId::new("2"));
        let coordinator = SyncCoordinator::new(remote);
        let queued = vec![post("1"), post("2"), post("3")];

        let report = coordinator.sync(&queued).await;

        assert_eq!(ids(&report.remaining), vec!["2"]);
        assert_eq!(report.synced, vec![PostId::new("1"), PostId::new("3")]);
        assert_eq!(report.delivered, vec![0, 2]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, PostId::new("2"));
        assert_eq!(coordinator.remote().create_calls(), 3);
    }

    #[tokio::test]
    async fn offline_forwards_nothing() {
        let coordinator = SyncCoordinator::new(MockRemote::new());
        let queued = vec![post("1"), post("2")];
        let offline = ConnectivityStatus::new(false, t());

        let report = coordinator.sync_when_online(&queued, &offline).await;

        assert_eq!(ids(&report.remaining), vec!["1", "2"]);
        assert!(report.synced.is_empty());
        assert_eq!(coordinator.remote().create_calls(), 0);
    }

    #[tokio::test]
    async fn service_down_forwards_nothing() {
        let coordinator = SyncCoordinator::new(MockRemote::new());
        let queued = vec![post("1")];
        let service_down = ConnectivityStatus::new(true, t());

        let report = coordinator.sync_when_online(&queued, &service_down).await;

        assert_eq!(report.remaining.len(), 1);
        assert_eq!(coordinator.remote().create_calls(), 0);
    }

    #[tokio::test]
    async fn sync_store_removes_delivered_posts() {
        let storage = MemoryStore::new();
        let (mut store, _) = OfflinePostStore::load(storage.clone(), StoreConfig::default()).await;
        for id in ["1", "2", "3"] {
            store.add(post(id)).await.unwrap();
        }
        let remote = MockRemote::new();
        remote.reject_post(&PostId::new("2"));
        let coordinator = SyncCoordinator::new(remote);

        let (report, warning) = coordinator.sync_store(&mut store, &online()).await;

        assert!(warning.is_none());
        assert_eq!(report.synced.len(), 2);
        assert_eq!(ids(store.posts()), vec!["2"]);

        let (reloaded, _) = OfflinePostStore::load(storage, StoreConfig::default()).await;
        assert_eq!(ids(reloaded.posts()), vec!["2"]);
    }

    #[tokio::test]
    async fn failed_post_sharing_an_id_stays_queued() {
        let storage = MemoryStore::new();
        storage.put_raw(
            crate::offline::OFFLINE_POSTS_KEY,
            r#"[{"title": "legacy one"}, {"title": "legacy two"}]"#,
        );
        let (mut store, _) = OfflinePostStore::load(storage.clone(), StoreConfig::default()).await;
        let dir = tempfile::tempdir().unwrap();
        let coordinator = SyncCoordinator::new(FileRemote::new(dir.path().join("remote.json")));

        let (report, warning) = coordinator.sync_store(&mut store, &online()).await;

        assert!(warning.is_none());
        assert_eq!(report.delivered, vec![0]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(store.len(), report.remaining.len());
        assert_eq!(store.posts()[0].title, "legacy two");

        let (reloaded, _) = OfflinePostStore::load(storage, StoreConfig::default()).await;
        assert_eq!(reloaded.posts()[0].title, "legacy two");
    }

    #[tokio::test]
    async fn sync_store_keeps_report_when_persist_fails() {
        let storage = MemoryStore::new();
        let (mut store, _) = OfflinePostStore::load(storage.clone(), StoreConfig::default()).await;
        store.add(post("1")).await.unwrap();
        storage.fail_next_set("disk full");
        let coordinator = SyncCoordinator::new(MockRemote::new());

        let (report, warning) = coordinator.sync_store(&mut store, &online()).await;

        assert_eq!(report.synced, vec![PostId::new("1")]);
        assert!(matches!(warning, Some(StoreWarning::Persist(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn sync_store_offline_leaves_store_untouched() {
        let storage = MemoryStore::new();
        let (mut store, _) = OfflinePostStore::load(storage.clone(), StoreConfig::default()).await;
        store.add(post("1")).await.unwrap();
        let coordinator = SyncCoordinator::new(MockRemote::new());

        let (report, _) = coordinator
            .sync_store(&mut store, &ConnectivityStatus::new(false, t()))
            .await;

        assert_eq!(report.remaining.len(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(storage.write_count(), 1);
    }
}
