//! Departure time handling.
//!
//! Timetable data provides times as "HH:MM" strings on a 24-hour clock.
//! Leading zeros are optional ("7:5" is 07:05), but anything else that is
//! not two colon-separated numbers in range is rejected rather than guessed.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when a time string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed time {value:?}: {reason}")]
pub struct MalformedTime {
    value: String,
    reason: &'static str,
}

impl MalformedTime {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }

    /// The raw string that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A time of day at which a bus departs.
///
/// Ordering is chronological within a single day. The field order matters:
/// the derived `Ord` compares hours first, then minutes.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::DepartureTime;
///
/// let t = DepartureTime::parse("7:5").unwrap();
/// assert_eq!(t.hour(), 7);
/// assert_eq!(t.minute(), 5);
/// assert_eq!(t.to_string(), "07:05");
///
/// assert!(DepartureTime::parse("7x5").is_err());
/// assert!(DepartureTime::parse("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartureTime {
    hour: u8,
    minute: u8,
}

impl DepartureTime {
    /// Create a time from components, returning `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Create a time from minutes since midnight (0..1440).
    pub fn from_minutes(total: u16) -> Option<Self> {
        if total >= MINUTES_PER_DAY {
            return None;
        }
        Self::from_hm(u32::from(total / 60), u32::from(total % 60))
    }

    /// Parse "H:M", "HH:MM" or any mix of one- and two-digit fields.
    pub fn parse(s: &str) -> Result<Self, MalformedTime> {
        let (hour_str, minute_str) = s
            .split_once(':')
            .ok_or_else(|| MalformedTime::new(s, "expected HH:MM format"))?;

        let hour = parse_field(hour_str).ok_or_else(|| MalformedTime::new(s, "invalid hour digits"))?;
        let minute =
            parse_field(minute_str).ok_or_else(|| MalformedTime::new(s, "invalid minute digits"))?;

        if hour > 23 {
            return Err(MalformedTime::new(s, "hour must be 0-23"));
        }
        if minute > 59 {
            return Err(MalformedTime::new(s, "minute must be 0-59"));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// Truncate a wall-clock time to minute precision.
    pub fn from_clock<T: chrono::Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

/// Parse one field of one or two ASCII digits.
fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 {
        return None;
    }
    field
        .chars()
        .try_fold(0u32, |acc, c| c.to_digit(10).map(|d| acc * 10 + d))
}

/// Parse an "HH:MM" string into minutes since midnight.
pub fn parse_time(s: &str) -> Result<u16, MalformedTime> {
    DepartureTime::parse(s).map(|t| t.minutes_since_midnight())
}

/// Compare two "HH:MM" strings chronologically.
pub fn compare_times(a: &str, b: &str) -> Result<Ordering, MalformedTime> {
    Ok(parse_time(a)?.cmp(&parse_time(b)?))
}

impl FromStr for DepartureTime {
    type Err = MalformedTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DepartureTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> DepartureTime {
        DepartureTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let time = t("00:00");
        assert_eq!((time.hour(), time.minute()), (0, 0));

        let time = t("23:59");
        assert_eq!((time.hour(), time.minute()), (23, 59));

        let time = t("14:30");
        assert_eq!((time.hour(), time.minute()), (14, 30));
    }

    #[test]
    fn missing_leading_zeros_accepted() {
        let time = t("7:5");
        assert_eq!(time.hour(), 7);
        assert_eq!(time.minute(), 5);
        assert_eq!(t("07:5"), t("7:05"));
    }

    #[test]
    fn parse_invalid_format() {
        assert!(DepartureTime::parse("7x5").is_err());
        assert!(DepartureTime::parse("").is_err());
        assert!(DepartureTime::parse(":").is_err());
        assert!(DepartureTime::parse("1430").is_err());
        assert!(DepartureTime::parse("14:").is_err());
        assert!(DepartureTime::parse(":30").is_err());
        assert!(DepartureTime::parse("14:300").is_err());
        assert!(DepartureTime::parse("1:2:3").is_err());
        assert!(DepartureTime::parse("ab:cd").is_err());
        assert!(DepartureTime::parse(" 7:05").is_err());
        assert!(DepartureTime::parse("-1:05").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(DepartureTime::parse("24:00").is_err());
        assert!(DepartureTime::parse("99:00").is_err());
        assert!(DepartureTime::parse("12:60").is_err());
        assert!(DepartureTime::parse("12:99").is_err());
    }

    #[test]
    fn error_reports_value() {
        let err = DepartureTime::parse("7x5").unwrap_err();
        assert_eq!(err.value(), "7x5");
        assert_eq!(err.to_string(), "malformed time \"7x5\": expected HH:MM format");

        let err = DepartureTime::parse("25:00").unwrap_err();
        assert_eq!(err.to_string(), "malformed time \"25:00\": hour must be 0-23");
    }

    #[test]
    fn display_pads() {
        assert_eq!(t("0:0").to_string(), "00:00");
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("23:59").to_string(), "23:59");
    }

    #[test]
    fn parse_time_total_minutes() {
        assert_eq!(parse_time("00:00").unwrap(), 0);
        assert_eq!(parse_time("07:30").unwrap(), 450);
        assert_eq!(parse_time("23:59").unwrap(), 1439);
        assert!(parse_time("7x5").is_err());
    }

    #[test]
    fn compare_times_numeric() {
        assert_eq!(compare_times("07:00", "7:00").unwrap(), Ordering::Equal);
        assert_eq!(compare_times("9:59", "10:00").unwrap(), Ordering::Less);
        assert_eq!(compare_times("23:00", "05:30").unwrap(), Ordering::Greater);
        assert!(compare_times("07:00", "bogus").is_err());
    }

    #[test]
    fn minutes_roundtrip_edges() {
        assert_eq!(DepartureTime::from_minutes(0), Some(t("00:00")));
        assert_eq!(DepartureTime::from_minutes(1439), Some(t("23:59")));
        assert_eq!(DepartureTime::from_minutes(1440), None);
        assert_eq!(DepartureTime::from_hm(24, 0), None);
    }

    #[test]
    fn from_clock_truncates_seconds() {
        let now = chrono::NaiveTime::from_hms_opt(7, 15, 59).unwrap();
        assert_eq!(DepartureTime::from_clock(&now), t("07:15"));
    }

    #[test]
    fn serde_uses_display_form() {
        let json = serde_json::to_string(&t("7:5")).unwrap();
        assert_eq!(json, "\"07:05\"");

        let back: DepartureTime = serde_json::from_str("\"7:05\"").unwrap();
        assert_eq!(back, t("07:05"));

        assert!(serde_json::from_str::<DepartureTime>("\"7x5\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time()) {
            prop_assert!(DepartureTime::parse(&time_str).is_ok());
        }

        /// Parse then display roundtrips for padded input
        #[test]
        fn parse_display_roundtrip(time_str in valid_time()) {
            let parsed = DepartureTime::parse(&time_str).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Unpadded input parses to the same instant as padded input
        #[test]
        fn unpadded_matches_padded(hour in 0u32..24, minute in 0u32..60) {
            let padded = DepartureTime::parse(&format!("{:02}:{:02}", hour, minute)).unwrap();
            let bare = DepartureTime::parse(&format!("{}:{}", hour, minute)).unwrap();
            prop_assert_eq!(padded, bare);
        }

        /// Ordering agrees with minutes since midnight
        #[test]
        fn ordering_matches_minutes(a in valid_time(), b in valid_time()) {
            let ta = DepartureTime::parse(&a).unwrap();
            let tb = DepartureTime::parse(&b).unwrap();
            prop_assert_eq!(ta.cmp(&tb), ta.minutes_since_midnight().cmp(&tb.minutes_since_midnight()));
            prop_assert_eq!(compare_times(&a, &b).unwrap(), ta.cmp(&tb));
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(DepartureTime::parse(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(DepartureTime::parse(&s).is_err());
        }

        /// Arbitrary strings never panic the parser
        #[test]
        fn arbitrary_input_never_panics(s in ".{0,8}") {
            let _ = DepartureTime::parse(&s);
        }
    }
}
