//! Upload queued posts.

use anyhow::Result;
use plushie_client::{SyncCoordinator, SyncReport};
use std::path::Path;

use super::status::check_connectivity;
use super::{open_remote, open_store, report_warning, short_id};
use crate::config::CliConfig;

/// Run the sync command.
pub async fn run(data_dir: &Path, config: &CliConfig, network_online: bool) -> Result<SyncReport> {
    let mut store = open_store(data_dir, config).await;

    if store.is_empty() {
        println!("Nothing to sync.");
        return Ok(SyncReport::default());
    }

    let remote = open_remote(data_dir, config);
    let status = check_connectivity(remote.clone(), config, network_online).await;
    if !status.can_sync() {
        println!("Sync skipped ({})", status.phase());
        println!();
        println!("{} posts stay queued and will sync when the connection is back.", store.len());
        return Ok(SyncReport {
            remaining: store.posts().to_vec(),
            ..SyncReport::default()
        });
    }

    let coordinator = SyncCoordinator::new(remote);
    let (report, warning) = coordinator.sync_store(&mut store, &status).await;
    if let Some(warning) = warning {
        report_warning(&warning);
    }

    println!("Sync complete!");
    println!();
    println!("  Synced:    {}", report.synced.len());
    println!("  Remaining: {}", report.remaining.len());
    for failure in &report.failures {
        println!("    [{}] {}", short_id(failure.id.as_str()), failure.error);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::post::{self, NewPost};
    use plushie_client::PostRemote;
    use tempfile::tempdir;

    async fn queue(dir: &Path, config: &CliConfig, count: usize) {
        for i in 0..count {
            let new = NewPost {
                title: format!("post {i}"),
                ..NewPost::default()
            };
            post::run(dir, config, new).await.unwrap();
        }
    }

    #[tokio::test]
    async fn sync_uploads_and_empties_queue() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();
        queue(dir.path(), &config, 2).await;

        let report = run(dir.path(), &config, true).await.unwrap();

        assert_eq!(report.synced.len(), 2);
        assert!(open_store(dir.path(), &config).await.is_empty());
        let remote = open_remote(dir.path(), &config);
        assert_eq!(remote.fetch_posts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn sync_offline_keeps_queue() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();
        queue(dir.path(), &config, 2).await;

        let report = run(dir.path(), &config, false).await.unwrap();

        assert!(report.synced.is_empty());
        assert_eq!(report.remaining.len(), 2);
        assert_eq!(open_store(dir.path(), &config).await.len(), 2);
    }

    #[tokio::test]
    async fn rejected_post_stays_queued() {
        let dir = tempdir().unwrap();
        let config = CliConfig::default();
        queue(dir.path(), &config, 3).await;

        let store = open_store(dir.path(), &config).await;
        let duplicate = store.posts()[1].clone();
        open_remote(dir.path(), &config)
            .create_post(&duplicate)
            .await
            .unwrap();

        let report = run(dir.path(), &config, true).await.unwrap();

        assert_eq!(report.synced.len(), 2);
        assert_eq!(report.failures.len(), 1);
        let store = open_store(dir.path(), &config).await;
        assert_eq!(store.posts(), &[duplicate]);
    }

    #[tokio::test]
    async fn sync_with_empty_queue() {
        let dir = tempdir().unwrap();
        let report = run(dir.path(), &CliConfig::default(), true).await.unwrap();
        assert!(report.is_complete());
    }
}
