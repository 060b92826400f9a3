//! Error types for logkeep

use thiserror::Error;

/// Result type alias for logkeep operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors that can occur when encoding, decoding, or storing log lines
#[derive(Debug, Error)]
pub enum LogError {
    /// A line claiming to start an event could not be parsed
    #[error("malformed log line ({reason}): {line}")]
    MalformedLine {
        /// The offending line, newline stripped
        line: String,
        /// What was missing or broken
        reason: &'static str,
    },

    /// Severity token outside the known set
    #[error("unknown severity level: {0}")]
    UnknownSeverity(String),

    /// File open/append/read failed
    #[error("log file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Create a malformed-line error for `line`
    pub fn malformed(line: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedLine {
            line: line.into(),
            reason,
        }
    }

    /// Check if this error is a decode failure (as opposed to an I/O failure)
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine { .. } | Self::UnknownSeverity(_)
        )
    }
}
