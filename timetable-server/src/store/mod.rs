//! Timetable data source.
//!
//! Loads published line timetables from JSON files at startup and serves
//! them by line id.

mod error;
mod timetables;

pub use error::StoreError;
pub use timetables::TimetableStore;
