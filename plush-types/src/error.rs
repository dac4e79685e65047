//! Error types for the post data model.

use thiserror::Error;

/// Errors that can occur while encoding or decoding posts.
#[derive(Debug, Error)]
pub enum ModelError {
    /// JSON serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// JSON deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}
