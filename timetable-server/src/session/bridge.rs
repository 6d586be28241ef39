//! Boundary between the schedule engine and whatever presents it.
//!
//! The engine produces plain data; a bridge turns it into a page, a
//! websocket message or a terminal screen.

use crate::domain::{LineId, TimetableEntry, TimetableError};
use crate::schedule::{AggregatedSchedule, ClassifiedSchedule};

use super::ViewSelection;

/// A newly selected slice of a line's timetable.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    pub entry: &'a TimetableEntry,
    pub selection: ViewSelection,
    pub schedule: &'a AggregatedSchedule,
}

/// Receives everything a presentation layer needs to stay in sync.
///
/// Calls arrive in order: a `show_view` for each selection change, then
/// `update_highlights` immediately and on every refresh tick. Returning an
/// error stops the refresh for that view.
pub trait RenderBridge: Send + Sync {
    /// The displayed slice changed; show its table and mark it active.
    fn show_view(&self, view: &ScheduleView<'_>) -> Result<(), TimetableError>;

    /// Fresh past/next/upcoming labels for the displayed slice.
    fn update_highlights(
        &self,
        line: &LineId,
        selection: ViewSelection,
        classified: &ClassifiedSchedule,
    ) -> Result<(), TimetableError>;
}
