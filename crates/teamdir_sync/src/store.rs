//! Member stores.
//!
//! A store loads and saves the whole collection and reports progress through
//! a [`SyncTracker`]. [`RemoteStore`] keeps the collection in a repository
//! file with optimistic-concurrency writes; [`LocalStore`] posts it to the
//! local write endpoint.

use crate::config::{RetryConfig, SyncConfig};
use crate::error::{SyncError, SyncResult};
use crate::http::{GithubContentsClient, LocalEndpointClient};
use crate::status::{SyncTicket, SyncTracker};
use crate::transport::{ContentsTransport, LocalTransport, ReadResponse, WriteRequest, WriteResponse};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use teamdir_core::{decode_content, encode_content, Member};
use tracing::{debug, error, info, warn};

/// Where a store keeps the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Repository file through the contents API.
    Remote,
    /// Local write endpoint; nothing is loaded.
    Local,
}

/// Loads and saves the whole member collection.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Returns the store mode.
    fn mode(&self) -> StoreMode;

    /// Loads the collection.
    async fn load(&self, tracker: &SyncTracker) -> SyncResult<Vec<Member>>;

    /// Replaces the stored collection.
    async fn save(&self, members: &[Member], tracker: &SyncTracker) -> SyncResult<()>;
}

/// Returns the commit message for a write at `at`.
pub fn commit_message(at: DateTime<Utc>) -> String {
    format!(
        "Internal Update - {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

fn record_failure(tracker: &SyncTracker, ticket: SyncTicket, err: &SyncError) {
    error!(error = %err, "Sync failed");
    tracker.fail(ticket, err.to_string());
}

/// Store backed by a repository file.
#[derive(Debug)]
pub struct RemoteStore<T> {
    transport: T,
    retry: RetryConfig,
}

impl<T: ContentsTransport> RemoteStore<T> {
    /// Creates a store over a transport.
    pub fn new(transport: T, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the retry configuration.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    async fn fetch(&self) -> SyncResult<Option<Vec<Member>>> {
        match self.transport.read().await? {
            ReadResponse::Found(file) => {
                let members = decode_content(&file.content)?;
                Ok(Some(members))
            }
            ReadResponse::NotFound => Ok(None),
            ReadResponse::Failed { status, message } => {
                Err(SyncError::FetchFailed { status, message })
            }
        }
    }

    async fn current_sha(&self) -> SyncResult<Option<String>> {
        Ok(match self.transport.read().await? {
            ReadResponse::Found(file) => Some(file.sha),
            ReadResponse::NotFound | ReadResponse::Failed { .. } => None,
        })
    }

    async fn write_once(&self, content: &str) -> SyncResult<()> {
        // Any fault while re-reading the version token is worth another attempt.
        let sha = self
            .current_sha()
            .await
            .map_err(|e| SyncError::transport_retryable(e.to_string()))?;
        let request = WriteRequest {
            message: commit_message(Utc::now()),
            content: content.to_string(),
            sha,
        };
        match self.transport.write(&request).await? {
            WriteResponse::Written => Ok(()),
            WriteResponse::Conflict { message } => Err(SyncError::Conflict { message }),
            WriteResponse::Failed { status, message } => {
                Err(SyncError::WriteFailed { status, message })
            }
        }
    }

    async fn write_with_retry(&self, members: &[Member]) -> SyncResult<()> {
        // A fault here ends the save; statuses other than found mean "no sha".
        let initial = self.current_sha().await?;
        debug!(has_sha = initial.is_some(), "Read version token");

        let content = encode_content(members)?;
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            match self.write_once(&content).await {
                Ok(()) => {
                    debug!(attempt, "Write accepted");
                    return Ok(());
                }
                Err(e) if e.is_retryable() => {
                    warn!(attempt, error = %e, "Write attempt failed");
                    last_error = Some(e);
                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(SyncError::RetriesExhausted))
    }
}

#[async_trait]
impl<T: ContentsTransport> MemberStore for RemoteStore<T> {
    fn mode(&self) -> StoreMode {
        StoreMode::Remote
    }

    async fn load(&self, tracker: &SyncTracker) -> SyncResult<Vec<Member>> {
        let ticket = tracker.begin();
        match self.fetch().await {
            Ok(Some(members)) => {
                info!(count = members.len(), "Loaded members");
                tracker.succeed(ticket, Utc::now());
                Ok(members)
            }
            Ok(None) => {
                info!("Stored file not found; starting with an empty collection");
                tracker.settle_idle(ticket, None);
                Ok(Vec::new())
            }
            Err(e) => {
                record_failure(tracker, ticket, &e);
                Err(e)
            }
        }
    }

    async fn save(&self, members: &[Member], tracker: &SyncTracker) -> SyncResult<()> {
        let ticket = tracker.begin();
        match self.write_with_retry(members).await {
            Ok(()) => {
                info!(count = members.len(), "Saved members");
                tracker.succeed(ticket, Utc::now());
                Ok(())
            }
            Err(e) => {
                record_failure(tracker, ticket, &e);
                Err(e)
            }
        }
    }
}

/// Store backed by the local write endpoint.
#[derive(Debug)]
pub struct LocalStore<L> {
    transport: L,
}

impl<L: LocalTransport> LocalStore<L> {
    /// Creates a store over a transport.
    pub fn new(transport: L) -> Self {
        Self { transport }
    }

    /// Returns the transport.
    pub fn transport(&self) -> &L {
        &self.transport
    }
}

#[async_trait]
impl<L: LocalTransport> MemberStore for LocalStore<L> {
    fn mode(&self) -> StoreMode {
        StoreMode::Local
    }

    async fn load(&self, tracker: &SyncTracker) -> SyncResult<Vec<Member>> {
        warn!("No remote credential configured; running in local mode");
        tracker.reset_idle();
        Ok(Vec::new())
    }

    async fn save(&self, members: &[Member], tracker: &SyncTracker) -> SyncResult<()> {
        let ticket = tracker.begin();
        match self.transport.post_members(members).await {
            Ok(()) => {
                info!(count = members.len(), "Saved members locally");
                tracker.succeed(ticket, Utc::now());
                Ok(())
            }
            Err(e) => {
                record_failure(tracker, ticket, &e);
                Err(e)
            }
        }
    }
}

/// The store selected by configuration.
#[derive(Debug)]
pub enum Backend {
    /// Repository file.
    Remote(RemoteStore<GithubContentsClient>),
    /// Local write endpoint.
    Local(LocalStore<LocalEndpointClient>),
}

impl Backend {
    /// Builds the remote store when a credential is configured, the local
    /// store otherwise.
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        match &config.remote {
            Some(remote) => {
                let client = GithubContentsClient::new(remote.clone())?;
                Ok(Backend::Remote(RemoteStore::new(client, config.retry.clone())))
            }
            None => {
                let client = LocalEndpointClient::new(config.local.clone())?;
                Ok(Backend::Local(LocalStore::new(client)))
            }
        }
    }
}

#[async_trait]
impl MemberStore for Backend {
    fn mode(&self) -> StoreMode {
        match self {
            Backend::Remote(store) => store.mode(),
            Backend::Local(store) => store.mode(),
        }
    }

    async fn load(&self, tracker: &SyncTracker) -> SyncResult<Vec<Member>> {
        match self {
            Backend::Remote(store) => store.load(tracker).await,
            Backend::Local(store) => store.load(tracker).await,
        }
    }

    async fn save(&self, members: &[Member], tracker: &SyncTracker) -> SyncResult<()> {
        match self {
            Backend::Remote(store) => store.save(members, tracker).await,
            Backend::Local(store) => store.save(members, tracker).await,
        }
    }
}
