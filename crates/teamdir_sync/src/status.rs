//! Sync status reporting.
//!
//! Every load or save takes a [`SyncTicket`]. Only the most recently issued
//! ticket may change the published status; outcomes of older operations are
//! dropped so an early failure can never overwrite a later success.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// The current sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    /// No operation in flight.
    #[default]
    Idle,
    /// A load or save is in flight.
    Syncing,
    /// The last save completed.
    Success,
    /// The last operation failed.
    Error,
}

impl SyncState {
    /// Returns true while an operation is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, SyncState::Syncing)
    }
}

/// Published sync status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    /// Current state.
    pub state: SyncState,
    /// Time of the last successful load or save.
    pub last_synced: Option<DateTime<Utc>>,
    /// Message of the last failure; cleared when an operation starts.
    pub error_message: Option<String>,
}

impl SyncStatus {
    /// Returns the status line shown to the user.
    pub fn label(&self) -> String {
        match self.state {
            SyncState::Syncing => "Syncing...".to_string(),
            SyncState::Error => "Sync Error".to_string(),
            SyncState::Idle | SyncState::Success => match self.last_synced {
                Some(at) => format!("Synced: {}", at.format("%H:%M:%S")),
                None => "Synced: Local Mode".to_string(),
            },
        }
    }
}

/// Handle identifying one load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTicket {
    seq: u64,
}

impl SyncTicket {
    /// Returns the sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
struct Inner {
    status: SyncStatus,
    latest: u64,
}

/// Tracks sync status across concurrent operations.
#[derive(Debug, Default)]
pub struct SyncTracker {
    inner: RwLock<Inner>,
}

impl SyncTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an operation: state becomes syncing, the error is cleared.
    pub fn begin(&self) -> SyncTicket {
        let mut inner = self.inner.write();
        inner.latest += 1;
        inner.status.state = SyncState::Syncing;
        inner.status.error_message = None;
        SyncTicket { seq: inner.latest }
    }

    /// Records a successful save.
    ///
    /// Returns false if the ticket is stale and nothing changed.
    pub fn succeed(&self, ticket: SyncTicket, at: DateTime<Utc>) -> bool {
        self.settle(ticket, |status| {
            status.state = SyncState::Success;
            status.last_synced = Some(at);
        })
    }

    /// Records a failure.
    pub fn fail(&self, ticket: SyncTicket, message: impl Into<String>) -> bool {
        let message = message.into();
        self.settle(ticket, |status| {
            status.state = SyncState::Error;
            status.error_message = Some(message);
        })
    }

    /// Records a successful load.
    ///
    /// `at` is `None` when nothing was read from the remote.
    pub fn settle_idle(&self, ticket: SyncTicket, at: Option<DateTime<Utc>>) -> bool {
        self.settle(ticket, |status| {
            status.state = SyncState::Idle;
            if at.is_some() {
                status.last_synced = at;
            }
        })
    }

    /// Resets to idle without a ticket, invalidating any operation in flight.
    pub fn reset_idle(&self) {
        let mut inner = self.inner.write();
        inner.latest += 1;
        inner.status.state = SyncState::Idle;
        inner.status.error_message = None;
    }

    /// Returns true if the ticket is the latest one issued.
    pub fn is_current(&self, ticket: SyncTicket) -> bool {
        self.inner.read().latest == ticket.seq
    }

    /// Returns a copy of the published status.
    pub fn snapshot(&self) -> SyncStatus {
        self.inner.read().status.clone()
    }

    /// Returns the current state.
    pub fn state(&self) -> SyncState {
        self.inner.read().status.state
    }

    fn settle(&self, ticket: SyncTicket, apply: impl FnOnce(&mut SyncStatus)) -> bool {
        let mut inner = self.inner.write();
        if inner.latest != ticket.seq {
            tracing::debug!(
                ticket = ticket.seq,
                latest = inner.latest,
                "Ignoring stale sync outcome"
            );
            return false;
        }
        apply(&mut inner.status);
        true
    }
}
