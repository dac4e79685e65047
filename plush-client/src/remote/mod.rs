//! Remote collaborator abstraction for plush-client.
//!
//! The hosted posts table is reached through two narrow traits so the sync
//! and feed code never depend on a particular client library:
//! - [`PostRemote`] lists posts and accepts new ones
//! - [`ReachabilityProbe`] answers "is the service responding right now?"
//!
//! # Example
//!
//! ```ignore
//! let remote = MockRemote::new();
//! remote.create_post(&post).await?;
//! let all = remote.fetch_posts().await?;
//! let up = remote.probe().await.unwrap_or(false);
//! ```

mod file;
mod mock;

pub use file::FileRemote;
pub use mock::MockRemote;

use async_trait::async_trait;
use plushie_types::{ExtendedPost, PostId, RawPost, UserInfo};
use thiserror::Error;

/// Remote errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The service refused a post.
    #[error("post {id} rejected: {reason}")]
    Rejected {
        /// Identifier of the refused post.
        id: PostId,
        /// Reason given by the service.
        reason: String,
    },

    /// The service returned data that could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Underlying I/O failed.
    #[error("remote I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A raw post as listed by the remote, with the owner's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePost {
    /// The record as stored remotely.
    pub post: RawPost,
    /// Owner profile, when the listing joined it.
    pub user: Option<UserInfo>,
}

/// Trait for the remote post collection.
#[async_trait]
pub trait PostRemote: Send + Sync {
    /// List all posts.
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>, RemoteError>;

    /// Forward one post. `Ok` means the remote now holds it.
    async fn create_post(&self, post: &ExtendedPost) -> Result<(), RemoteError>;
}

/// Trait for lightweight liveness checks of the remote service.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Check whether the service is responding.
    async fn probe(&self) -> Result<bool, RemoteError>;
}
