//! # teamdir Sync
//!
//! Keeps the in-memory directory mirrored to a JSON file stored in a
//! repository through a contents API, or to a local write endpoint when no
//! remote credential is configured.
//!
//! This crate provides:
//! - Sync status reporting (idle → syncing → success | error)
//! - Remote store: fetch with not-found fallback, optimistic-concurrency
//!   writes with linear backoff on conflict
//! - Local fallback store: single-attempt POST of the whole collection
//! - Transport abstraction with reqwest-backed and mock implementations
//! - Sessions tying a directory to a store
//!
//! ## Key Invariants
//!
//! - Mutations are applied in memory before any write (write-through)
//! - The bootstrap load never triggers a save
//! - Every sync attempt passes through `Syncing` first
//! - Outcomes of superseded attempts never overwrite the status

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod http;
mod secret;
mod session;
mod status;
mod store;
mod transport;

pub use config::{
    ConfigSource, LocalConfig, RemoteConfig, RetryConfig, SyncConfig, DEFAULT_API_BASE,
    DEFAULT_BRANCH, DEFAULT_FILE_PATH, DEFAULT_LOCAL_ENDPOINT,
};
pub use error::{ConfigError, SyncError, SyncResult};
pub use http::{GithubContentsClient, LocalEndpointClient};
pub use secret::AccessToken;
pub use session::Session;
pub use status::{SyncState, SyncStatus, SyncTicket, SyncTracker};
pub use store::{commit_message, Backend, LocalStore, MemberStore, RemoteStore, StoreMode};
pub use transport::{
    ContentsTransport, LocalTransport, MockLocalTransport, MockTransport, ReadResponse,
    RemoteFile, WriteRequest, WriteResponse,
};
