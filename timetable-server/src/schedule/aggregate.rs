//! Departure aggregation.
//!
//! A line's timetable lists departure times per station. The displayed
//! schedule for one (day-type, direction) slice is the union of those lists:
//! a time that appears at several stations is one logical departure.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{DayType, DepartureTime, Direction, TimetableEntry, TimetableError};

/// The deduplicated, sorted schedule for one slice of a line.
///
/// Derived on demand and never mutated; a view change builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedSchedule {
    /// Minutes past each hour, ascending. Hours without departures are absent.
    #[serde(serialize_with = "serialize_by_hour")]
    departures_by_hour: BTreeMap<u32, Vec<u32>>,

    /// Every departure, ascending.
    sorted_departures: Vec<DepartureTime>,
}

impl AggregatedSchedule {
    /// Build from parsed times in any order, with duplicates.
    pub fn from_times(times: impl IntoIterator<Item = DepartureTime>) -> Self {
        let unique: BTreeSet<DepartureTime> = times.into_iter().collect();

        let mut departures_by_hour: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for time in &unique {
            // BTreeSet iteration is ascending, so each bucket fills in order
            departures_by_hour
                .entry(time.hour())
                .or_default()
                .push(time.minute());
        }

        Self {
            departures_by_hour,
            sorted_departures: unique.into_iter().collect(),
        }
    }

    pub fn departures_by_hour(&self) -> &BTreeMap<u32, Vec<u32>> {
        &self.departures_by_hour
    }

    pub fn sorted_departures(&self) -> &[DepartureTime] {
        &self.sorted_departures
    }

    /// First departure of the day, if any.
    pub fn first(&self) -> Option<DepartureTime> {
        self.sorted_departures.first().copied()
    }

    pub fn len(&self) -> usize {
        self.sorted_departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_departures.is_empty()
    }
}

/// Serialize hours as `"7"` keys and minutes as `"05"` strings.
fn serialize_by_hour<S: serde::Serializer>(
    by_hour: &BTreeMap<u32, Vec<u32>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(by_hour.len()))?;
    for (hour, minutes) in by_hour {
        let minutes: Vec<String> = minutes.iter().map(|m| format!("{:02}", m)).collect();
        map.serialize_entry(&hour.to_string(), &minutes)?;
    }
    map.end()
}

/// Aggregate one (day-type, direction) slice of a line's timetable.
///
/// Every station's times for the slice are parsed, merged, deduplicated and
/// sorted. The result does not depend on station order. A slice with no
/// departures yields an empty schedule.
///
/// # Errors
///
/// Returns [`TimetableError::MalformedTime`] naming the line and station if
/// any time string in the slice cannot be parsed.
pub fn aggregate(
    entry: &TimetableEntry,
    day_type: DayType,
    direction: Direction,
) -> Result<AggregatedSchedule, TimetableError> {
    let mut times = Vec::with_capacity(entry.raw_departure_count(day_type, direction));

    for station in &entry.stations {
        for raw in station.times.slice(day_type, direction) {
            let time = DepartureTime::parse(raw).map_err(|source| TimetableError::MalformedTime {
                line: entry.line_id.clone(),
                station: station.name.clone(),
                source,
            })?;
            times.push(time);
        }
    }

    Ok(AggregatedSchedule::from_times(times))
}
