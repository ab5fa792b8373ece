//! Error types for teamdir core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Stored content is not valid base64.
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded content is not valid UTF-8.
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A draft failed validation.
    #[error("invalid {kind}: {message}")]
    Validation {
        /// What was being validated (member, task, skill).
        kind: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// No member with the given identifier.
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// Nothing to export.
    #[error("No data available to export")]
    EmptyExport,
}

impl CoreError {
    pub(crate) fn validation(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::validation("member", "name is required");
        assert_eq!(err.to_string(), "invalid member: name is required");

        assert_eq!(
            CoreError::EmptyExport.to_string(),
            "No data available to export"
        );
    }
}
