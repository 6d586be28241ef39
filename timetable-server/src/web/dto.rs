//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DayType, Direction, LineId, LocalizedText, TimetableEntry};
use crate::schedule::{AggregatedSchedule, ClassifiedSchedule};
use crate::session::{ScheduleView, ViewSelection};

/// A line in the line list.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    pub line_id: LineId,
    pub line_name: LocalizedText,
    pub directions: [LocalizedText; 2],
    pub station_count: usize,
}

impl From<&TimetableEntry> for LineSummary {
    fn from(entry: &TimetableEntry) -> Self {
        Self {
            line_id: entry.line_id.clone(),
            line_name: entry.line_name.clone(),
            directions: entry.directions.clone(),
            station_count: entry.stations.len(),
        }
    }
}

/// Response listing all lines.
#[derive(Debug, Serialize)]
pub struct LineListResponse {
    pub lines: Vec<LineSummary>,
}

/// A line's descriptive details, without times.
#[derive(Debug, Serialize)]
pub struct LineDetail {
    pub line_id: LineId,
    pub line_name: LocalizedText,
    pub directions: [LocalizedText; 2],
    /// Station names in route order
    pub stations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<LocalizedText>,
}

impl From<&TimetableEntry> for LineDetail {
    fn from(entry: &TimetableEntry) -> Self {
        Self {
            line_id: entry.line_id.clone(),
            line_name: entry.line_name.clone(),
            directions: entry.directions.clone(),
            stations: entry.stations.iter().map(|s| s.name.clone()).collect(),
            notes: entry.notes.clone(),
        }
    }
}

/// Query selecting a timetable slice.
///
/// Values are parsed by the handler so bad input gets a clear message.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// weekday, saturday or sunday (defaults to today's)
    pub day: Option<String>,

    /// directionA or directionB (defaults to A)
    pub direction: Option<String>,

    /// Reference time in HH:MM format (defaults to now)
    pub at: Option<String>,
}

/// The selected slice of a line and its layout by hour.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPayload {
    pub line_id: LineId,
    pub line_name: LocalizedText,
    pub direction_label: LocalizedText,
    pub selection: ViewSelection,
    pub schedule: AggregatedSchedule,
}

impl From<&ScheduleView<'_>> for ViewPayload {
    fn from(view: &ScheduleView<'_>) -> Self {
        Self {
            line_id: view.entry.line_id.clone(),
            line_name: view.entry.line_name.clone(),
            direction_label: view.entry.direction_label(view.selection.direction).clone(),
            selection: view.selection,
            schedule: view.schedule.clone(),
        }
    }
}

/// One-shot schedule response.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub view: ViewPayload,
    pub highlights: ClassifiedSchedule,
}

/// Message sent to a live view client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The displayed slice changed
    View(ViewPayload),
    /// Fresh highlight labels for the displayed slice
    Highlights {
        line_id: LineId,
        selection: ViewSelection,
        #[serde(flatten)]
        classified: ClassifiedSchedule,
    },
    /// A client request failed; the previous view stays selected
    Error { message: String },
}

/// Message received from a live view client.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SelectDayType {
        day_type: DayType,
    },
    SelectDirection {
        direction: Direction,
    },
    SwapDirection,
    /// Switch line, optionally pre-selecting a slice (e.g. from a map click)
    LoadLine {
        line_id: LineId,
        day_type: Option<DayType>,
        direction: Option<Direction>,
    },
    /// Pin the clock to "YYYY-MM-DDTHH:MM", or follow real time when absent
    SetReferenceTime {
        at: Option<String>,
    },
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
