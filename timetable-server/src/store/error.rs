//! Timetable store error types.

use std::path::PathBuf;

use crate::domain::LineId;

/// Errors that can occur while loading timetable data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading a file or directory failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid timetable JSON
    #[error("failed to parse {path}: {message}")]
    Json { path: PathBuf, message: String },

    /// A line breaks a structural invariant
    #[error("invalid line {line}: {reason}")]
    Invalid { line: LineId, reason: &'static str },

    /// Two entries share a line id
    #[error("duplicate line id {0}")]
    DuplicateLine(LineId),
}
