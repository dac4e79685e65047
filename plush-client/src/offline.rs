//! OfflinePostStore - the durable queue of posts awaiting sync.
//!
//! The store pairs the in-memory [`OfflineQueue`] from plush-core with an
//! injected [`KeyValueStore`]. Every mutation rewrites the whole serialized
//! queue before returning, so memory and storage agree whenever a call
//! completes successfully.
//!
//! Storage trouble never loses the in-memory queue:
//! - unreadable or corrupt data on load yields an empty queue and a warning
//! - a failed write is returned as a [`StoreWarning`]; memory keeps the
//!   mutation and the next successful write catches storage up
//!
//! # Example
//!
//! ```ignore
//! let (mut store, warning) = OfflinePostStore::load(FileStore::new(dir), StoreConfig::default()).await;
//! store.add(post).await?;
//! store.remove_by_id(&id).await?;
//! ```

use std::collections::HashSet;

use plushie_core::{convert_post_to_extended_post, OfflineQueue};
use plushie_types::{decode_posts, encode_posts, ExtendedPost, ModelError, PostId};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// Storage key the queue is persisted under.
pub const OFFLINE_POSTS_KEY: &str = "offlinePosts";

/// Configuration for [`OfflinePostStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key for the serialized queue.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: OFFLINE_POSTS_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Use a different storage key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }
}

/// Recoverable problems keeping the queue persisted.
#[derive(Debug, Error)]
pub enum StoreWarning {
    /// Persisted data could not be parsed and was ignored.
    #[error("stored offline posts were unreadable and have been ignored: {0}")]
    Corrupt(#[source] ModelError),

    /// Persisted data could not be read.
    #[error("offline posts could not be read: {0}")]
    Unreadable(#[source] StorageError),

    /// The queue could not be encoded.
    #[error("offline posts could not be encoded: {0}")]
    Encode(#[source] ModelError),

    /// The queue could not be written.
    #[error("offline posts were not saved: {0}")]
    Persist(#[source] StorageError),
}

/// Persisted, ordered collection of posts awaiting sync.
#[derive(Debug)]
pub struct OfflinePostStore<S: KeyValueStore> {
    storage: S,
    key: String,
    queue: OfflineQueue,
}

impl<S: KeyValueStore> OfflinePostStore<S> {
    /// Load the queue from `storage`.
    ///
    /// Never fails: a missing key is an empty queue, and unreadable or
    /// malformed data is an empty queue plus a warning. Entries written
    /// with either field spelling are reconciled on the way in.
    pub async fn load(storage: S, config: StoreConfig) -> (Self, Option<StoreWarning>) {
        let (queue, warning) = match storage.get(&config.key).await {
            Ok(None) => (OfflineQueue::new(), None),
            Ok(Some(data)) => match decode_posts(&data) {
                Ok(posts) => {
                    let posts = posts.iter().map(convert_post_to_extended_post).collect();
                    (OfflineQueue::from_posts(posts), None)
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable offline posts: {}", e);
                    (OfflineQueue::new(), Some(StoreWarning::Corrupt(e)))
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read offline posts: {}", e);
                (OfflineQueue::new(), Some(StoreWarning::Unreadable(e)))
            }
        };

        tracing::debug!("Loaded {} offline posts", queue.len());
        let store = Self {
            storage,
            key: config.key,
            queue,
        };
        (store, warning)
    }

    /// Append a post and persist the queue.
    pub async fn add(&mut self, post: ExtendedPost) -> Result<(), StoreWarning> {
        tracing::debug!("Queueing offline post {}", post.id);
        self.queue.push(post);
        self.persist().await
    }

    /// Remove the post with the given identifier and persist the queue.
    ///
    /// Returns `Ok(None)` without writing if nothing matched.
    pub async fn remove_by_id(&mut self, id: &PostId) -> Result<Option<ExtendedPost>, StoreWarning> {
        match self.queue.remove_by_id(id) {
            Some(post) => {
                self.persist().await?;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    /// Remove every post in `synced` with a single write.
    ///
    /// Returns the number of posts removed.
    pub async fn remove_synced(&mut self, synced: &HashSet<PostId>) -> Result<usize, StoreWarning> {
        let removed = self.queue.remove_synced(synced);
        if removed > 0 {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Remove the posts at the given queue positions with a single write.
    ///
    /// Unlike [`Self::remove_synced`] this cannot touch another post that
    /// happens to share an identifier. Returns the number of posts removed.
    pub async fn remove_positions(&mut self, positions: &[usize]) -> Result<usize, StoreWarning> {
        let removed = self.queue.remove_positions(positions);
        if removed > 0 {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Empty the queue and persist the empty collection.
    pub async fn clear(&mut self) -> Result<(), StoreWarning> {
        self.queue.clear();
        self.persist().await
    }

    /// Queued posts in order.
    pub fn posts(&self) -> &[ExtendedPost] {
        self.queue.posts()
    }

    /// Number of queued posts.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check if a post is queued.
    pub fn contains(&self, id: &PostId) -> bool {
        self.queue.contains(id)
    }

    /// Get a reference to the underlying storage (for testing).
    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn persist(&self) -> Result<(), StoreWarning> {
        let encoded = encode_posts(self.queue.posts()).map_err(StoreWarning::Encode)?;
        self.storage
            .set(&self.key, &encoded)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to persist {} offline posts: {}", self.queue.len(), e);
                StoreWarning::Persist(e)
            })
    }
}
