//! Next-departure resolution.

use std::collections::BTreeMap;

use serde::Serialize;

use super::AggregatedSchedule;
use crate::domain::{DepartureTime, MINUTES_PER_DAY};

/// Find the next departure at or after `now_hour:now_minute` today.
///
/// Walks hours in ascending order, skipping those already gone. A later hour
/// yields its earliest minute; the current hour yields its first minute not
/// yet passed, or falls through to the next hour. Returns `None` once every
/// departure of the day has left, including when there are none at all.
///
/// A departure at exactly the current minute still counts as next.
pub fn resolve_next(
    departures_by_hour: &BTreeMap<u32, Vec<u32>>,
    now_hour: u32,
    now_minute: u32,
) -> Option<DepartureTime> {
    for (&hour, minutes) in departures_by_hour.range(now_hour..) {
        let minute = if hour > now_hour {
            minutes.iter().copied().min()
        } else {
            minutes.iter().copied().find(|&m| m >= now_minute)
        };

        if let Some(minute) = minute {
            return DepartureTime::from_hm(hour, minute);
        }
    }
    None
}

/// Which service day a resolved departure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceDay {
    Today,
    Tomorrow,
}

/// The departure a rider standing at the stop now would catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextDeparture {
    pub time: DepartureTime,
    pub day: ServiceDay,
    /// Whole minutes from now until the departure.
    pub wait_minutes: u16,
}

/// Resolve the next departure including rollover to tomorrow's first one.
///
/// Returns `None` only for an empty schedule.
pub fn next_departure(schedule: &AggregatedSchedule, now: DepartureTime) -> Option<NextDeparture> {
    let now_mins = now.minutes_since_midnight();

    if let Some(time) = resolve_next(schedule.departures_by_hour(), now.hour(), now.minute()) {
        return Some(NextDeparture {
            time,
            day: ServiceDay::Today,
            wait_minutes: time.minutes_since_midnight() - now_mins,
        });
    }

    schedule.first().map(|time| NextDeparture {
        time,
        day: ServiceDay::Tomorrow,
        wait_minutes: MINUTES_PER_DAY - now_mins + time.minutes_since_midnight(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> DepartureTime {
        DepartureTime::parse(s).unwrap()
    }

    fn schedule(times: &[&str]) -> AggregatedSchedule {
        AggregatedSchedule::from_times(times.iter().map(|s| t(s)))
    }

    fn resolve(times: &[&str], now: &str) -> Option<DepartureTime> {
        let now = t(now);
        resolve_next(schedule(times).departures_by_hour(), now.hour(), now.minute())
    }

    #[test]
    fn later_minute_in_current_hour() {
        assert_eq!(resolve(&["07:00", "07:30", "08:00"], "07:15"), Some(t("07:30")));
    }

    #[test]
    fn exact_minute_is_next() {
        assert_eq!(resolve(&["07:00", "07:30"], "07:30"), Some(t("07:30")));
    }

    #[test]
    fn current_hour_exhausted_falls_through() {
        assert_eq!(resolve(&["07:00", "07:10", "09:45"], "07:20"), Some(t("09:45")));
    }

    #[test]
    fn later_hour_uses_its_earliest_minute() {
        assert_eq!(resolve(&["10:40", "10:05", "10:20"], "08:59"), Some(t("10:05")));
    }

    #[test]
    fn before_first_departure() {
        assert_eq!(resolve(&["05:00", "05:30"], "00:00"), Some(t("05:00")));
    }

    #[test]
    fn all_passed_is_none() {
        assert_eq!(resolve(&["05:00", "05:30"], "23:50"), None);
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(resolve(&[], "12:00"), None);
    }

    #[test]
    fn next_departure_today_with_wait() {
        let next = next_departure(&schedule(&["07:00", "07:30", "08:00"]), t("07:15")).unwrap();
        assert_eq!(next.time, t("07:30"));
        assert_eq!(next.day, ServiceDay::Today);
        assert_eq!(next.wait_minutes, 15);
    }

    #[test]
    fn next_departure_rolls_over_to_tomorrow() {
        let next = next_departure(&schedule(&["05:00", "05:30"]), t("23:50")).unwrap();
        assert_eq!(next.time, t("05:00"));
        assert_eq!(next.day, ServiceDay::Tomorrow);
        // 10 minutes to midnight, then 5 hours
        assert_eq!(next.wait_minutes, 310);
    }

    #[test]
    fn next_departure_empty_schedule() {
        assert_eq!(next_departure(&schedule(&[]), t("12:00")), None);
    }
}
