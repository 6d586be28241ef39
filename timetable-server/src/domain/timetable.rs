//! Timetable data for a single bus line.
//!
//! These types map directly onto the published timetable JSON. Time strings
//! are kept raw here; they are parsed when a schedule slice is aggregated so
//! that a malformed value surfaces as an error for the slice that uses it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DayType, Direction, LineId};

/// Display text in several languages, keyed by language code.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::LocalizedText;
///
/// let text = LocalizedText::from_pairs([("en", "Central Station"), ("bs", "Centralna stanica")]);
/// assert_eq!(text.get("bs"), Some("Centralna stanica"));
/// // Unknown languages fall back to English, then to any available text
/// assert_eq!(text.get("fr"), Some("Central Station"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

/// Language used when the requested one is missing.
const FALLBACK_LANGUAGE: &str = "en";

impl LocalizedText {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(lang, text)| (lang.to_string(), text.to_string()))
                .collect(),
        )
    }

    /// Text in `lang`, falling back to English and then to any language.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .get(lang)
            .or_else(|| self.0.get(FALLBACK_LANGUAGE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-direction departure strings: `[direction A, direction B]`.
pub type DirectionTimes = [Vec<String>; 2];

/// A station's raw departure times for every day-type and direction.
///
/// An empty list means no service for that slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTimes {
    pub weekday: DirectionTimes,
    pub saturday: DirectionTimes,
    pub sunday: DirectionTimes,
}

impl StationTimes {
    /// Departure strings for one slice.
    pub fn slice(&self, day_type: DayType, direction: Direction) -> &[String] {
        let by_direction = match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        };
        &by_direction[direction.index()]
    }
}

/// One stop along a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub times: StationTimes,
}

/// A bus line's complete timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub line_id: LineId,
    pub line_name: LocalizedText,
    /// Labels for direction A and direction B.
    pub directions: [LocalizedText; 2],
    /// Stops in route order.
    pub stations: Vec<Station>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<LocalizedText>,
}

impl TimetableEntry {
    /// Label for one direction.
    pub fn direction_label(&self, direction: Direction) -> &LocalizedText {
        &self.directions[direction.index()]
    }

    /// Check structural invariants that serde cannot express.
    ///
    /// Time strings are not checked here.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.stations.is_empty() {
            return Err("line has no stations");
        }
        if self.stations.iter().any(|s| s.name.trim().is_empty()) {
            return Err("station name must not be empty");
        }
        Ok(())
    }

    /// Total number of raw departure strings for one slice, across stations.
    pub fn raw_departure_count(&self, day_type: DayType, direction: Direction) -> usize {
        self.stations
            .iter()
            .map(|s| s.times.slice(day_type, direction).len())
            .sum()
    }
}
