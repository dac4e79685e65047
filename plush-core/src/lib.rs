//! # plush-core
//!
//! Pure logic for the plushie feed (no I/O, instant tests).
//!
//! This crate implements normalization, feed views and the connectivity
//! state machine without any network or disk I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (storage, remote calls, timers) is performed by
//! `plush-client`, which interprets the actions produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connectivity;
pub mod feed;
pub mod normalize;
pub mod queue;

pub use connectivity::{Action, ConnectivityStatus, Event, Phase};
pub use feed::{effective_timestamp, marketplace_listings, merge_posts, process, SortKey};
pub use normalize::{
    convert_post_to_extended_post, normalize, normalize_at, normalize_for_feed,
    normalize_for_marketplace, NormalizeOptions, FALLBACK_USERNAME,
};
pub use queue::OfflineQueue;
