//! Domain error types.
//!
//! These errors represent bad timetable data and failed deliveries to a
//! rendering bridge. An empty schedule is not an error.

use super::{LineId, MalformedTime};

/// Errors raised while building or publishing a schedule.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimetableError {
    /// A station lists a departure that is not a valid time of day
    #[error("line {line}, station {station:?}: {source}")]
    MalformedTime {
        line: LineId,
        station: String,
        #[source]
        source: MalformedTime,
    },

    /// The rendering bridge could not accept an update
    #[error("rendering bridge failed: {0}")]
    Bridge(String),
}
