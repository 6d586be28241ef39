//! Domain types for the bus timetable.
//!
//! This module contains validated timetable data types. Identifiers and
//! times enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod day_type;
mod direction;
mod error;
mod line_id;
mod time;
mod timetable;

pub use day_type::{DayType, ParseDayTypeError};
pub use direction::{Direction, ParseDirectionError};
pub use error::TimetableError;
pub use line_id::{InvalidLineId, LineId};
pub use time::{DepartureTime, MINUTES_PER_DAY, MalformedTime, compare_times, parse_time};
pub use timetable::{DirectionTimes, LocalizedText, Station, StationTimes, TimetableEntry};
