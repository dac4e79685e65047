//! CLI command implementations.

pub mod clear;
pub mod feed;
pub mod market;
pub mod post;
pub mod queue;
pub mod remove;
pub mod status;
pub mod sync;

use chrono::{DateTime, Utc};
use plushie_client::{FileRemote, FileStore, OfflinePostStore, StoreWarning};
use plushie_types::ExtendedPost;
use std::path::Path;

use crate::config::CliConfig;

/// Open the offline queue kept in `data_dir`.
pub async fn open_store(data_dir: &Path, config: &CliConfig) -> OfflinePostStore<FileStore> {
    let (store, warning) =
        OfflinePostStore::load(FileStore::new(data_dir), config.store_config()).await;
    if let Some(warning) = warning {
        report_warning(&warning);
    }
    store
}

/// Open the remote post table configured for `data_dir`.
pub fn open_remote(data_dir: &Path, config: &CliConfig) -> FileRemote {
    FileRemote::new(config.remote_path(data_dir))
}

/// Show a non-fatal store problem to the user.
pub fn report_warning(warning: &StoreWarning) {
    eprintln!("Warning: {}", warning);
}

/// One-line summary of a post.
pub fn format_post(post: &ExtendedPost) -> String {
    let title = if post.title.is_empty() {
        "(untitled)"
    } else {
        &post.title
    };
    format!(
        "[{}] {} by {} ({} likes, {})",
        short_id(post.id.as_str()),
        title,
        post.username,
        post.likes,
        format_age(post.created_at, Utc::now())
    )
}

/// First eight characters of an identifier.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Format a time relative to `now`.
pub fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - at).num_seconds().max(0);

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86400)
    }
}
