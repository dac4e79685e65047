//! Show the social feed.

use anyhow::Result;
use plushie_client::FeedLoader;
use plushie_core::{process, SortKey};
use plushie_types::ExtendedPost;
use std::path::Path;

use super::{format_post, open_remote, open_store};
use crate::config::CliConfig;

/// Run the feed command.
///
/// Remote posts and queued posts are merged, then filtered by `query` and
/// ordered by `sort` (`newest`, `oldest`, `popular`; anything else keeps
/// the merged order).
pub async fn run(
    data_dir: &Path,
    config: &CliConfig,
    query: &str,
    sort: &str,
) -> Result<Vec<ExtendedPost>> {
    let store = open_store(data_dir, config).await;

    let mut loader = FeedLoader::new(open_remote(data_dir, config));
    if let Some(name) = &config.profile.default_username {
        loader = loader.with_default_username(name);
    }

    let posts = loader.load_feed(store.posts()).await;
    let view = process(&posts, query, SortKey::from(sort));

    if view.is_empty() {
        println!("No posts to show.");
    }
    for post in &view {
        println!("{}", format_post(post));
    }

    Ok(view)
}
