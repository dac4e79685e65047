//! Serialized form of the offline post queue.
//!
//! The queue is stored as a JSON array of canonical posts under a single
//! key. Entries written by older builds may lack fields; they are filled
//! with defaults on read.

use crate::{ExtendedPost, ModelError};

/// Serialize a post collection to its persisted form.
pub fn encode_posts(posts: &[ExtendedPost]) -> Result<String, ModelError> {
    serde_json::to_string(posts).map_err(ModelError::Serialization)
}

/// Parse a persisted post collection.
pub fn decode_posts(data: &str) -> Result<Vec<ExtendedPost>, ModelError> {
    serde_json::from_str(data).map_err(ModelError::Deserialization)
}
