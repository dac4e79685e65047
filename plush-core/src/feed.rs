//! Derived feed views.
//!
//! [`process`] turns a canonical post collection plus a search query and a
//! sort key into the ordered view a feed screen shows. It borrows its input
//! and returns a fresh vector, so repeated calls with the same arguments
//! always agree.

use chrono::{DateTime, Utc};
use plushie_types::{ExtendedPost, PostId};
use std::collections::HashSet;

use crate::normalize::ordering_time;

/// How a feed view is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Most liked first.
    Popular,
    /// Keep the filtered order.
    Unsorted,
}

impl From<&str> for SortKey {
    /// Unknown keys leave the order unchanged.
    fn from(key: &str) -> Self {
        match key {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            _ => Self::Unsorted,
        }
    }
}

/// Filter `posts` by `query` and order the result by `sort`.
///
/// A non-empty query (trimmed, case-insensitive) keeps posts whose title,
/// content or any tag contains it. Sorting is stable.
pub fn process(posts: &[ExtendedPost], query: &str, sort: SortKey) -> Vec<ExtendedPost> {
    let needle = query.trim().to_lowercase();
    let mut view: Vec<ExtendedPost> = posts
        .iter()
        .filter(|post| needle.is_empty() || matches_query(post, &needle))
        .cloned()
        .collect();

    match sort {
        SortKey::Newest => view.sort_by_key(|post| std::cmp::Reverse(effective_timestamp(post))),
        SortKey::Oldest => view.sort_by_key(effective_timestamp),
        SortKey::Popular => view.sort_by_key(|post| std::cmp::Reverse(post.likes)),
        SortKey::Unsorted => {}
    }

    view
}

/// The time a post is ordered by: `timestamp`, else `created_at`, else the
/// Unix epoch. See the precedence table in [`crate::normalize`].
pub fn effective_timestamp(post: &ExtendedPost) -> DateTime<Utc> {
    ordering_time(post)
}

/// Union of two collections by post identifier; the first occurrence wins.
///
/// Order is `primary` followed by the entries of `secondary` not already
/// seen. Posts without an identifier cannot be matched and are all kept.
pub fn merge_posts(primary: Vec<ExtendedPost>, secondary: Vec<ExtendedPost>) -> Vec<ExtendedPost> {
    let mut seen: HashSet<PostId> = HashSet::new();
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());

    for post in primary.into_iter().chain(secondary) {
        if post.id.is_empty() || seen.insert(post.id.clone()) {
            merged.push(post);
        }
    }

    merged
}

/// Posts currently listed on the marketplace.
pub fn marketplace_listings(posts: &[ExtendedPost]) -> Vec<ExtendedPost> {
    posts
        .iter()
        .filter(|post| post.for_sale && !post.sold)
        .cloned()
        .collect()
}

fn matches_query(post: &ExtendedPost, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
