//! Remove a post from the offline queue.

use anyhow::Result;
use plushie_types::PostId;
use std::path::Path;

use super::{open_store, report_warning};
use crate::config::CliConfig;

/// Run the remove command.
///
/// `id` may be the full identifier or a unique prefix of one. Returns
/// whether a post was removed.
pub async fn run(data_dir: &Path, config: &CliConfig, id: &str) -> Result<bool> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("Post id must not be empty");
    }

    let mut store = open_store(data_dir, config).await;

    let matches: Vec<PostId> = store
        .posts()
        .iter()
        .filter(|post| post.id.as_str() == id || post.id.as_str().starts_with(id))
        .map(|post| post.id.clone())
        .collect();

    let target = match matches.as_slice() {
        [] => {
            println!("No queued post matches {}", id);
            return Ok(false);
        }
        [only] => only.clone(),
        _ if store.contains(&PostId::new(id)) => PostId::new(id),
        _ => anyhow::bail!("{} matches {} queued posts; use a longer id", id, matches.len()),
    };

    if let Err(warning) = store.remove_by_id(&target).await {
        report_warning(&warning);
    }

    println!("Removed post {}", target);
    Ok(true)
}
