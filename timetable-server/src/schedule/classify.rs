//! Departure highlighting.
//!
//! Every departure in a slice is labelled relative to the current time so a
//! bridge can grey out departed buses and highlight the next one. When the
//! day's service is over the list is read as tomorrow's: the first departure
//! becomes `next` and nothing is `past`.

use serde::Serialize;

use super::{AggregatedSchedule, NextDeparture, next_departure, resolve_next};
use crate::domain::DepartureTime;

/// Highlight status of a single departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureStatus {
    Past,
    Next,
    Upcoming,
}

/// A departure with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedDeparture {
    pub time: DepartureTime,
    pub status: DepartureStatus,
}

/// Label each departure as past, next or upcoming.
///
/// `departures` must be ascending. `next` is the resolver's answer for
/// today, `None` when no departure remains. Exactly one entry is `next` for
/// a non-empty list; if a time is repeated only its first occurrence is.
pub fn classify(
    departures: &[DepartureTime],
    next: Option<DepartureTime>,
    now_minutes: u16,
) -> Vec<ClassifiedDeparture> {
    let rollover = next.is_none()
        || departures
            .iter()
            .all(|d| d.minutes_since_midnight() < now_minutes);

    // Rollover day: tomorrow's first departure is the one to catch
    let target = if rollover {
        departures.first().copied()
    } else {
        next
    };

    let mut next_assigned = false;
    departures
        .iter()
        .map(|&time| {
            let status = if !next_assigned && Some(time) == target {
                next_assigned = true;
                DepartureStatus::Next
            } else if !rollover && time.minutes_since_midnight() < now_minutes {
                DepartureStatus::Past
            } else {
                DepartureStatus::Upcoming
            };
            ClassifiedDeparture { time, status }
        })
        .collect()
}

/// Full classification of one schedule slice at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSchedule {
    /// Reference time, truncated to the minute.
    pub now: DepartureTime,
    pub next: Option<NextDeparture>,
    /// Every departure of today has left; labels refer to tomorrow.
    pub rollover: bool,
    pub departures: Vec<ClassifiedDeparture>,
}

impl ClassifiedSchedule {
    /// Resolve and classify `schedule` as of `now`.
    pub fn build(schedule: &AggregatedSchedule, now: DepartureTime) -> Self {
        let today = resolve_next(schedule.departures_by_hour(), now.hour(), now.minute());
        let departures = classify(schedule.sorted_departures(), today, now.minutes_since_midnight());

        Self {
            now,
            next: next_departure(schedule, now),
            rollover: today.is_none() && !schedule.is_empty(),
            departures,
        }
    }

    /// Departures with the given status.
    pub fn with_status(&self, status: DepartureStatus) -> impl Iterator<Item = DepartureTime> + '_ {
        self.departures
            .iter()
            .filter(move |d| d.status == status)
            .map(|d| d.time)
    }
}
