//! Show connectivity and queue status.

use anyhow::Result;
use chrono::Utc;
use plushie_client::{ConnectivityMonitor, FileRemote};
use plushie_core::ConnectivityStatus;
use std::path::Path;
use std::sync::Arc;

use super::{format_age, open_remote, open_store};
use crate::config::CliConfig;

/// Run a connectivity monitor until its first probe resolves.
///
/// With the network down no probe runs and the initial status is returned.
/// A probe that outlasts the configured wait leaves the service marked
/// unreachable.
pub async fn check_connectivity(
    remote: FileRemote,
    config: &CliConfig,
    network_online: bool,
) -> ConnectivityStatus {
    let monitor =
        ConnectivityMonitor::spawn(Arc::new(remote), config.monitor_config(), network_online);

    if network_online {
        let mut rx = monitor.subscribe();
        if tokio::time::timeout(config.probe_wait(), rx.changed())
            .await
            .is_err()
        {
            tracing::warn!("No probe result within {:?}", config.probe_wait());
        }
    }

    let status = monitor.status();
    monitor.shutdown().await;
    status
}

/// Run the status command.
pub async fn run(
    data_dir: &Path,
    config: &CliConfig,
    network_online: bool,
) -> Result<ConnectivityStatus> {
    println!("=== plush-cli status ===");
    println!();

    let remote = open_remote(data_dir, config);
    let remote_path = remote.path().to_path_buf();
    let status = check_connectivity(remote, config, network_online).await;

    println!("Connection:");
    println!("  Status:  {}", status.phase());
    println!("  Checked: {}", format_age(status.last_checked, Utc::now()));
    println!("  Remote:  {}", remote_path.display());
    println!();

    let store = open_store(data_dir, config).await;
    println!("Offline queue:");
    println!("  Posts:    {} waiting to sync", store.len());
    println!("  Data dir: {}", data_dir.display());

    if !store.is_empty() && status.can_sync() {
        println!();
        println!("Run 'plush-cli sync' to upload queued posts.");
    }

    Ok(status)
}
