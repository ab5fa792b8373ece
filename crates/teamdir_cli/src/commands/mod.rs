//! CLI command implementations.

pub mod details;
pub mod export;
pub mod list;
pub mod members;
pub mod show;
pub mod stats;
pub mod status;

use std::error::Error;
use std::io::{self, BufRead, Write};
use teamdir_core::{Confirm, RecordId};
use teamdir_sync::{MemberStore, Session, SyncError, SyncState, SyncStatus};

/// Result type for command implementations.
pub type CommandResult<T = ()> = Result<T, Box<dyn Error>>;

/// Refuses to change anything when the initial load failed, so a partial
/// collection never replaces the stored one.
pub fn ensure_loaded(load_error: Option<&SyncError>) -> CommandResult {
    match load_error {
        Some(e) => Err(format!("refusing to modify the directory: initial load failed ({e})").into()),
        None => Ok(()),
    }
}

/// Resolves a member id or employee id to the member id.
pub fn resolve_member<S: MemberStore>(session: &Session<S>, key: &str) -> CommandResult<RecordId> {
    session
        .directory()
        .find(key)
        .map(|m| m.id.clone())
        .ok_or_else(|| format!("member not found: {key}").into())
}

/// Prints the sync status line and fails if the last operation failed.
pub fn finish(status: &SyncStatus) -> CommandResult {
    eprintln!("{}", status.label());
    if status.state == SyncState::Error {
        let message = status.error_message.as_deref().unwrap_or("unknown error");
        return Err(format!("sync failed: {message}").into());
    }
    Ok(())
}

/// Asks for confirmation on the terminal.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}

/// Returns true for "y" or "yes" in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn finish_fails_on_error_state() {
        let status = SyncStatus {
            state: SyncState::Error,
            last_synced: None,
            error_message: Some("Update Error (409): stale".into()),
        };
        let err = finish(&status).unwrap_err();
        assert_eq!(err.to_string(), "sync failed: Update Error (409): stale");

        let status = SyncStatus {
            state: SyncState::Success,
            last_synced: Some(Utc::now()),
            error_message: None,
        };
        assert!(finish(&status).is_ok());
    }

    #[test]
    fn mutations_refused_after_failed_load() {
        let err = SyncError::FetchFailed {
            status: 500,
            message: "Unknown error".into(),
        };
        assert!(ensure_loaded(Some(&err)).is_err());
        assert!(ensure_loaded(None).is_ok());
    }
}
