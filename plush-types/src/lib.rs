//! # plush-types
//!
//! Post data model for the plushie feed.
//!
//! This crate provides the foundational types used across all plushie crates:
//! - [`PostId`] - Post identity
//! - [`RawPost`], [`UserInfo`] - Records as received from any data source
//! - [`ExtendedPost`] - The canonical post shape used everywhere else
//! - [`encode_posts`] / [`decode_posts`] - Offline queue serialization
//! - [`ModelError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod error;
mod ids;
mod post;

pub use codec::{decode_posts, encode_posts};
pub use error::ModelError;
pub use ids::PostId;
pub use post::{ExtendedPost, RawPost, UserInfo};
