//! List posts waiting to sync.

use anyhow::Result;
use std::path::Path;

use super::{format_post, open_store};
use crate::config::CliConfig;

/// Run the queue command.
///
/// Returns the number of queued posts.
pub async fn run(data_dir: &Path, config: &CliConfig) -> Result<usize> {
    let store = open_store(data_dir, config).await;

    if store.is_empty() {
        println!("No posts waiting to sync.");
        return Ok(0);
    }

    println!("{} posts waiting to sync:", store.len());
    println!();
    for post in store.posts() {
        println!("  {}", format_post(post));
    }

    Ok(store.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::post::{self, NewPost};
    use tempfile::tempdir;

    #[tokio::test]
    async fn empty_queue() {
        let dir = tempdir().unwrap();
        assert_eq!(run(dir.path(), &CliConfig::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn lists_queued_posts() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();
        for title in ["a", "b"] {
            let new = NewPost {
                title: title.into(),
                ..NewPost::default()
            };
            post::run(dir.path(), &config, new).await.unwrap();
        }

        assert_eq!(run(dir.path(), &config).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn corrupt_queue_lists_as_empty() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("offlinePosts.json"), "not json")
            .await
            .unwrap();

        assert_eq!(run(dir.path(), &CliConfig::default()).await.unwrap(), 0);
    }
}
