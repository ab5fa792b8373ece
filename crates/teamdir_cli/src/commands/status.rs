//! Status command implementation.

use teamdir_sync::{MemberStore, Session, StoreMode};

/// Runs the status command.
pub fn run<S: MemberStore>(session: &Session<S>) {
    let mode = match session.mode() {
        StoreMode::Remote => "remote",
        StoreMode::Local => "local",
    };
    let status = session.status();
    println!("Mode:    {mode}");
    println!("Members: {}", session.directory().len());
    if let Some(at) = status.last_synced {
        println!("Synced:  {}", at.to_rfc3339());
    }
    if let Some(message) = &status.error_message {
        println!("Error:   {message}");
    }
}
