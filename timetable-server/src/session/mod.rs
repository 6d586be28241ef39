//! Live timetable sessions.
//!
//! A session is one rendered timetable: which slice is selected, the
//! schedule computed for it, and the periodic refresh that keeps its
//! past/next/upcoming labels current as the clock moves.

mod bridge;
mod config;
mod refresh;
mod selection;
mod timetable_session;

pub use bridge::{RenderBridge, ScheduleView};
pub use config::SessionConfig;
pub use refresh::{DEFAULT_REFRESH_INTERVAL, RefreshHandle, RefreshScheduler};
pub use selection::{ViewSelection, ViewStateMachine};
pub use timetable_session::TimetableSession;
