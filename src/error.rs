//! Centralized error handling for the logseal crate.
//!
//! Every fallible codec operation returns [`Result`]. The variants mirror the
//! conditions a validation pass can hit on real log files: records too short
//! to carry a code, stored codes that no longer match their content, and
//! lines that are not valid UTF-8. All of them are recoverable by the caller;
//! a pass over a file reports which lines failed and keeps going.
//!
//! The [`ResultExt`] trait adds `.context()` / `.with_context()` so call
//! sites can annotate errors without pulling a context crate into the
//! library:
//!
//! ```
//! use logseal::error::{Result, ResultExt as _};
//!
//! fn load(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! ```

use std::fmt;

/// Main error type for logseal operations.
#[derive(Debug)]
pub enum LogsealError {
    /// I/O errors (reading or writing log files)
    Io(std::io::Error),

    /// Record has too few fields to carry an integrity code, or a field
    /// span asked for more content fields than the record has
    MalformedRecord(String),

    /// Stored integrity code differs from the recomputed one
    ChecksumMismatch {
        /// Code recomputed from the record's content fields
        expected: String,
        /// Code found in the record's trailing field
        found: String,
    },

    /// Line bytes are not valid UTF-8
    Encoding(String),

    /// Bad options file or CLI configuration
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for LogsealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedRecord(msg) => write!(f, "Malformed record: {msg}"),
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "Checksum mismatch: expected {expected}, found {found}")
            }
            Self::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for LogsealError {}

impl From<std::io::Error> for LogsealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<std::str::Utf8Error> for LogsealError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<serde_json::Error> for LogsealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for logseal operations.
pub type Result<T> = std::result::Result<T, LogsealError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LogsealError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: LogsealError = e.into();
            LogsealError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: LogsealError = e.into();
            LogsealError::Other(format!("{}: {}", f(), err))
        })
    }
}
