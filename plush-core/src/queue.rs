//! In-memory offline post queue.
//!
//! This module holds the ordered collection of posts created while the
//! remote service was unavailable:
//! - FIFO ordering for forwarding
//! - Removal by post identifier once a post is synced
//! - Batch removal of everything a sync pass delivered, by id or by position
//!
//! The queue is used by the client's offline store, which pairs it with a
//! key-value store and re-serializes after every mutation.

use plushie_types::{ExtendedPost, PostId};
use std::collections::HashSet;

/// Ordered queue of posts awaiting sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfflineQueue {
    posts: Vec<ExtendedPost>,
}

impl OfflineQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue holding `posts` in order.
    pub fn from_posts(posts: Vec<ExtendedPost>) -> Self {
        Self { posts }
    }

    /// Append a post to the back of the queue.
    pub fn push(&mut self, post: ExtendedPost) {
        self.posts.push(post);
    }

    /// Remove the first post with the given identifier.
    ///
    /// Returns `None` if no post matches.
    pub fn remove_by_id(&mut self, id: &PostId) -> Option<ExtendedPost> {
        let index = self.posts.iter().position(|post| &post.id == id)?;
        Some(self.posts.remove(index))
    }

    /// Remove every post whose identifier is in `synced`.
    ///
    /// Returns the number of posts removed.
    pub fn remove_synced(&mut self, synced: &HashSet<PostId>) -> usize {
        let before = self.posts.len();
        self.posts.retain(|post| !synced.contains(&post.id));
        before - self.posts.len()
    }

    /// Remove the posts at the given queue positions.
    ///
    /// Positions refer to the queue as it was before the call; out of range
    /// positions are ignored. Returns the number of posts removed.
    pub fn remove_positions(&mut self, positions: &[usize]) -> usize {
        let doomed: HashSet<usize> = positions.iter().copied().collect();
        let before = self.posts.len();
        let mut index = 0;
        self.posts.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        before - self.posts.len()
    }

    /// Check if a post with the given identifier is queued.
    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.iter().any(|post| &post.id == id)
    }

    /// Queued posts in order.
    pub fn posts(&self) -> &[ExtendedPost] {
        &self.posts
    }

    /// Number of queued posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Remove all posts.
    pub fn clear(&mut self) {
        self.posts.clear();
    }
}
