//! Client errors.

use thiserror::Error;

use crate::offline::StoreWarning;
use crate::remote::RemoteError;
use crate::storage::StorageError;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Remote error.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Offline store could not be kept in sync with storage.
    #[error("offline store: {0}")]
    Store(#[from] StoreWarning),

    /// The connectivity monitor task is no longer running.
    #[error("connectivity monitor stopped")]
    MonitorStopped,
}
