//! Timetable server.
//!
//! Turns published bus line timetables into per-hour departure tables and
//! keeps "past / next / upcoming" highlights current while a line is shown.

pub mod clock;
pub mod config;
pub mod domain;
pub mod schedule;
pub mod session;
pub mod store;
pub mod web;
