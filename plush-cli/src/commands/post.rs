//! Create a post in the offline queue.

use anyhow::Result;
use plushie_core::{normalize, NormalizeOptions};
use plushie_types::{PostId, RawPost};
use std::path::Path;

use super::{open_store, report_warning, short_id};
use crate::config::CliConfig;

/// Fields of a new post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Body text.
    pub content: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Asking price; setting one lists the post for sale.
    pub price: Option<f64>,
}

/// Run the post command.
///
/// Returns the new post's identifier.
pub async fn run(data_dir: &Path, config: &CliConfig, new: NewPost) -> Result<PostId> {
    let id = PostId::generate();
    let raw = RawPost {
        id: Some(id.clone()),
        user_id: config.profile.user_id.clone(),
        title: Some(new.title),
        content: new.content,
        image: new.image,
        tags: Some(new.tags),
        for_sale: Some(new.price.is_some()),
        price: new.price,
        ..RawPost::default()
    };

    let mut options = NormalizeOptions::default();
    if let Some(name) = &config.profile.default_username {
        options = options.with_default_username(name);
    }
    let post = normalize(&raw, None, &options);

    let mut store = open_store(data_dir, config).await;
    if let Err(warning) = store.add(post).await {
        report_warning(&warning);
    }

    println!("Post queued!");
    println!();
    println!("  ID:     {}", short_id(id.as_str()));
    println!("  Queued: {} posts waiting to sync", store.len());

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            tags: vec!["bunny".to_string()],
            ..NewPost::default()
        }
    }

    #[tokio::test]
    async fn post_is_queued_and_persisted() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();

        let id = run(dir.path(), &config, new_post("Sunday picnic")).await.unwrap();

        assert!(dir.path().join("offlinePosts.json").exists());
        let store = open_store(dir.path(), &config).await;
        assert_eq!(store.len(), 1);
        let post = &store.posts()[0];
        assert_eq!(post.id, id);
        assert_eq!(post.title, "Sunday picnic");
        assert_eq!(post.username, "User");
        assert!(!post.for_sale);
    }

    #[tokio::test]
    async fn price_lists_post_for_sale() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();
        let new = NewPost {
            price: Some(18.0),
            ..new_post("Vintage bear")
        };

        run(dir.path(), &config, new).await.unwrap();

        let store = open_store(dir.path(), &config).await;
        assert!(store.posts()[0].for_sale);
        assert_eq!(store.posts()[0].price, 18.0);
    }

    #[tokio::test]
    async fn profile_is_applied() {
        let dir = tempdir().unwrap();
        let mut config = CliConfig::default();
        config.profile.user_id = Some("u-9".into());
        config.profile.default_username = Some("cuddles".into());

        run(dir.path(), &config, new_post("hi")).await.unwrap();

        let store = open_store(dir.path(), &config).await;
        let post = &store.posts()[0];
        assert_eq!(post.user_id, "u-9");
        assert_eq!(post.user_id_alias, "u-9");
        assert_eq!(post.username, "cuddles");
    }

    #[tokio::test]
    async fn posts_accumulate_in_order() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();

        let first = run(dir.path(), &config, new_post("one")).await.unwrap();
        let second = run(dir.path(), &config, new_post("two")).await.unwrap();

        let store = open_store(dir.path(), &config).await;
        let ids: Vec<_> = store.posts().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }
}
