//! Empty the offline queue.

use anyhow::Result;
use std::path::Path;

use super::{open_store, report_warning};
use crate::config::CliConfig;

/// Run the clear command.
///
/// Returns the number of posts discarded.
pub async fn run(data_dir: &Path, config: &CliConfig) -> Result<usize> {
    let mut store = open_store(data_dir, config).await;
    let discarded = store.len();

    if let Err(warning) = store.clear().await {
        report_warning(&warning);
    }

    println!("Cleared {} queued posts", discarded);
    Ok(discarded)
}
