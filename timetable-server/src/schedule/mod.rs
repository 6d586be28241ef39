//! Schedule computation.
//!
//! Turns a line's raw timetable into the departures shown for one
//! (day-type, direction) slice, and labels each one relative to the clock.
//! Everything here is pure: the same inputs always give the same output.

mod aggregate;
mod classify;
mod next_departure;

pub use aggregate::{AggregatedSchedule, aggregate};
pub use classify::{ClassifiedDeparture, ClassifiedSchedule, DepartureStatus, classify};
pub use next_departure::{NextDeparture, ServiceDay, next_departure, resolve_next};
