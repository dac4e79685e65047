//! Configuration loading for plush-cli.
//!
//! Configuration is read from `plush.toml` in the data directory. A missing
//! file, section or field falls back to its default.

use plushie_client::{MonitorConfig, StoreConfig, DEFAULT_PROBE_INTERVAL, OFFLINE_POSTS_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "plush.toml";

/// Root configuration for plush-cli.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Offline store configuration.
    #[serde(default)]
    pub store: StoreSection,
    /// Connectivity monitor configuration.
    #[serde(default)]
    pub monitor: MonitorSection,
    /// Local user profile.
    #[serde(default)]
    pub profile: ProfileSection,
    /// Remote post table configuration.
    #[serde(default)]
    pub remote: RemoteSection,
}

/// Offline store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// Storage key for queued posts (default: offlinePosts).
    #[serde(default = "default_store_key")]
    pub key: String,
}

/// Connectivity monitor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Seconds between reachability probes (default: 30).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
    /// Seconds to wait for a probe before reporting status (default: 5).
    #[serde(default = "default_probe_wait_secs")]
    pub probe_wait_secs: u64,
}

/// Local user profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSection {
    /// Owner id stamped on new posts.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Display name for posts without a profile name.
    #[serde(default)]
    pub default_username: Option<String>,
}

/// Remote post table configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSection {
    /// JSON file acting as the hosted table (default: `<data dir>/remote.json`).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_store_key() -> String {
    OFFLINE_POSTS_KEY.to_string()
}

fn default_probe_interval_secs() -> u64 {
    DEFAULT_PROBE_INTERVAL.as_secs()
}

fn default_probe_wait_secs() -> u64 {
    5
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            key: default_store_key(),
        }
    }
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            probe_interval_secs: default_probe_interval_secs(),
            probe_wait_secs: default_probe_wait_secs(),
        }
    }
}

impl CliConfig {
    /// Load `plush.toml` from `data_dir`, or defaults if it does not exist.
    pub async fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Self::default());
        }
        Self::from_file(&path).await
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Offline store settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_key(&self.store.key)
    }

    /// Monitor settings.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::default().with_interval(Duration::from_secs(self.monitor.probe_interval_secs))
    }

    /// How long to wait for the first probe.
    pub fn probe_wait(&self) -> Duration {
        Duration::from_secs(self.monitor.probe_wait_secs)
    }

    /// Location of the remote post table.
    pub fn remote_path(&self, data_dir: &Path) -> PathBuf {
        match &self.remote.path {
            Some(path) => path.clone(),
            None => data_dir.join("remote.json"),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
