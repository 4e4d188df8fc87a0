//! crates/sitelog/src/error.rs
//! Error types for logger construction and call-site resolution.

use std::io;
use std::path::PathBuf;

use sitelog_sink::EncodingError;

/// Error returned when a logger cannot be built from its configuration.
///
/// Every variant is raised at construction time; a logger that was built
/// successfully never reports a configuration problem later.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The level string is not one of the five accepted names.
    #[error(
        "invalid log level {0:?}; expected one of \"debug\", \"info\", \"warning\", \"error\", \"critical\""
    )]
    InvalidLevel(String),

    /// The encoding label is empty or unknown.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The path depth is outside the accepted range.
    #[error("path depth must be at least 1, got {0}")]
    InvalidPathDepth(usize),

    /// Neither a file path nor a stream was requested.
    #[error("a file logger needs a path, a stream, or both")]
    NoTarget,

    /// The log file's parent directory does not exist.
    #[error("parent directory of {} does not exist", path.display())]
    MissingParent {
        /// Path of the requested log file.
        path: PathBuf,
    },

    /// The log file could not be opened.
    #[error("failed to open log file {}", path.display())]
    Open {
        /// Path of the requested log file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Error raised when a call site cannot be determined.
///
/// This indicates a programming error in the code reporting the location
/// and is always propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallSiteError {
    /// The frame carries neither a file name nor a session identifier.
    #[error("call site at line {line} has neither a file name nor a session identifier")]
    Unresolvable {
        /// Line number reported by the frame.
        line: u32,
    },
}
