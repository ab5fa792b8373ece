//! Error types for sync operations.

use teamdir_core::CoreError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport fault.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The write carried a stale version token.
    #[error("Update Error (409): {message}")]
    Conflict {
        /// Provider message.
        message: String,
    },

    /// Reading the remote file failed with a status other than not-found.
    #[error("GitHub API Error ({status}): {message}")]
    FetchFailed {
        /// HTTP status code.
        status: u16,
        /// Provider message.
        message: String,
    },

    /// Writing the remote file failed with a non-conflict status.
    #[error("Update Error ({status}): {message}")]
    WriteFailed {
        /// HTTP status code.
        status: u16,
        /// Provider message.
        message: String,
    },

    /// The local write endpoint rejected the collection.
    #[error("{0}")]
    Local(String),

    /// Every attempt was used without a recorded error.
    #[error("failed to save after retries")]
    RetriesExhausted,

    /// Unexpected response shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Codec or directory error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if the write loop may try again after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Transport { retryable, .. } => *retryable,
            SyncError::Conflict { .. } => true,
            _ => false,
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is missing.
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// A setting has an invalid value.
    #[error("invalid setting {name}: {message}")]
    Invalid {
        /// Setting name.
        name: &'static str,
        /// Description of the problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(SyncError::transport_retryable("connection reset").is_retryable());
        assert!(!SyncError::transport_fatal("bad certificate").is_retryable());
        assert!(SyncError::Conflict {
            message: "sha mismatch".into()
        }
        .is_retryable());
        assert!(!SyncError::WriteFailed {
            status: 422,
            message: "invalid".into()
        }
        .is_retryable());
        assert!(!SyncError::Local("disk full".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = SyncError::FetchFailed {
            status: 401,
            message: "Bad credentials".into(),
        };
        assert_eq!(err.to_string(), "GitHub API Error (401): Bad credentials");

        let err = SyncError::Conflict {
            message: "is at abc but expected def".into(),
        };
        assert_eq!(err.to_string(), "Update Error (409): is at abc but expected def");

        let err = SyncError::from(ConfigError::Missing("TEAMDIR_GITHUB_OWNER"));
        assert_eq!(
            err.to_string(),
            "missing required setting: TEAMDIR_GITHUB_OWNER"
        );
    }
}
