//! Feed loading.
//!
//! Pulls raw posts from the remote, normalizes them, and combines them with
//! the offline queue so locally created posts show up before they sync.

use plushie_core::{marketplace_listings, merge_posts, normalize, NormalizeOptions};
use plushie_types::ExtendedPost;

use crate::error::ClientError;
use crate::remote::{PostRemote, RemotePost};

/// Loads the social feed and marketplace from a [`PostRemote`].
#[derive(Debug)]
pub struct FeedLoader<R: PostRemote> {
    remote: R,
    default_username: Option<String>,
}

impl<R: PostRemote> FeedLoader<R> {
    /// Create a loader for `remote`.
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            default_username: None,
        }
    }

    /// Display name for posts whose owner has no profile name.
    pub fn with_default_username(mut self, username: &str) -> Self {
        self.default_username = Some(username.to_string());
        self
    }

    /// Remote posts followed by offline posts not yet on the remote.
    ///
    /// If the remote cannot be listed the offline posts are returned alone.
    pub async fn load_feed(&self, offline: &[ExtendedPost]) -> Vec<ExtendedPost> {
        let remote = match self.remote.fetch_posts().await {
            Ok(rows) => self.normalize_all(&rows, false),
            Err(e) => {
                tracing::warn!("Showing offline posts only, remote unavailable: {}", e);
                Vec::new()
            }
        };

        tracing::debug!(
            "Loaded feed: {} remote, {} offline",
            remote.len(),
            offline.len()
        );
        merge_posts(remote, offline.to_vec())
    }

    /// Unsold listings flagged for sale on the remote.
    pub async fn load_marketplace(&self) -> Result<Vec<ExtendedPost>, ClientError> {
        let rows: Vec<RemotePost> = self
            .remote
            .fetch_posts()
            .await?
            .into_iter()
            .filter(|row| row.post.for_sale.or(row.post.for_sale_alias).unwrap_or(false))
            .collect();

        Ok(marketplace_listings(&self.normalize_all(&rows, true)))
    }

    /// Get a reference to the remote (for testing).
    pub fn remote(&self) -> &R {
        &self.remote
    }

    fn normalize_all(&self, rows: &[RemotePost], for_sale: bool) -> Vec<ExtendedPost> {
        let mut options = NormalizeOptions::for_sale(for_sale);
        if let Some(name) = &self.default_username {
            options = options.with_default_username(name);
        }

        rows.iter()
            .map(|row| normalize(&row.post, row.user.as_ref(), &options))
            .collect()
    }
}
