//! # plush-client
//!
//! Async side of the plushie app core: everything that touches storage,
//! the remote service, or time.
//!
//! ## Features
//!
//! - **Offline Post Store**: posts created without a connection survive restarts
//! - **Connectivity Monitor**: network and service reachability on a `watch` channel
//! - **Sync Coordinator**: forwards queued posts once the service is back
//! - **Feed Loader**: remote posts normalized and merged with the offline queue
//! - **Pure State Machine**: connectivity transitions come from plush-core
//!
//! ## Example
//!
//! ```ignore
//! use plushie_client::{FileStore, OfflinePostStore, StoreConfig, SyncCoordinator};
//!
//! let (mut store, _) = OfflinePostStore::load(FileStore::new(dir), StoreConfig::default()).await;
//! store.add(post).await?;
//!
//! let (report, warning) = SyncCoordinator::new(remote).sync_store(&mut store, &monitor.status()).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod feed;
pub mod monitor;
pub mod offline;
pub mod remote;
pub mod storage;
pub mod sync;

pub use error::ClientError;
pub use feed::FeedLoader;
pub use monitor::{ConnectivityMonitor, MonitorConfig, NetworkSignal, DEFAULT_PROBE_INTERVAL};
pub use offline::{OfflinePostStore, StoreConfig, StoreWarning, OFFLINE_POSTS_KEY};
pub use remote::{FileRemote, MockRemote, PostRemote, ReachabilityProbe, RemoteError, RemotePost};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use sync::{SyncCoordinator, SyncFailure, SyncReport};
