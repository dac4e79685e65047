//! Key-value storage abstraction for plush-client.
//!
//! The offline post store persists through this trait, so the same code
//! runs against the platform store in production and an in-memory map in
//! tests.
//!
//! # Design
//!
//! The trait is async and string-valued:
//! - `get()` returns `None` for a missing key
//! - `set()` replaces the whole value
//! - `remove()` of a missing key succeeds
//!
//! # Example
//!
//! ```ignore
//! let store = MemoryStore::new();
//! store.set("offlinePosts", "[]").await?;
//! assert_eq!(store.get("offlinePosts").await?, Some("[]".into()));
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Write rejected by the backend.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Read rejected by the backend.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Key cannot be stored by this backend.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Trait for string key-value stores.
///
/// Implementations handle the underlying medium (files, browser storage,
/// memory).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
