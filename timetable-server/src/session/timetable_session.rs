//! A rendered timetable and everything that keeps it live.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::clock::Clock;
use crate::domain::{DayType, DepartureTime, Direction, TimetableEntry, TimetableError};
use crate::schedule::{AggregatedSchedule, ClassifiedSchedule, aggregate};

use super::bridge::{RenderBridge, ScheduleView};
use super::config::SessionConfig;
use super::refresh::RefreshScheduler;
use super::selection::{ViewSelection, ViewStateMachine};

/// One displayed timetable.
///
/// Owns the loaded line, its view state machine, the aggregated schedule of
/// the selected slice and the single refresh that keeps highlights current.
/// Only the selected slice is ever aggregated; the other five are computed
/// when (and if) they are selected.
///
/// Every transition re-aggregates, notifies the bridge and re-arms the
/// refresh, which classifies immediately, so the bridge never shows stale
/// highlights after a user action. Must be used inside a tokio runtime.
pub struct TimetableSession {
    entry: Arc<TimetableEntry>,
    machine: ViewStateMachine,
    schedule: Arc<AggregatedSchedule>,
    clock: Arc<dyn Clock>,
    bridge: Arc<dyn RenderBridge>,
    config: SessionConfig,
    refresh: RefreshScheduler,
}

impl TimetableSession {
    /// Render `entry` and start refreshing it.
    ///
    /// `initial` overrides the default "today, direction A" selection, e.g.
    /// when a map click asks for a specific slice.
    pub fn open(
        entry: Arc<TimetableEntry>,
        clock: Arc<dyn Clock>,
        bridge: Arc<dyn RenderBridge>,
        config: SessionConfig,
        initial: Option<ViewSelection>,
    ) -> Result<Self, TimetableError> {
        let machine = ViewStateMachine::new(clock.now().date(), initial);
        let mut session = Self {
            entry: entry.clone(),
            machine: machine.clone(),
            schedule: Arc::default(),
            clock,
            bridge,
            config,
            refresh: RefreshScheduler::new(),
        };
        session.render(entry, machine)?;
        Ok(session)
    }

    /// Replace the displayed line with a fresh view state.
    ///
    /// On error the previous line stays displayed.
    pub fn load_line(
        &mut self,
        entry: Arc<TimetableEntry>,
        initial: Option<ViewSelection>,
    ) -> Result<ViewSelection, TimetableError> {
        let machine = ViewStateMachine::new(self.clock.now().date(), initial);
        self.render(entry, machine)
    }

    pub fn select_day_type(&mut self, day_type: DayType) -> Result<ViewSelection, TimetableError> {
        let mut machine = self.machine.clone();
        machine.select_day_type(day_type);
        self.render(self.entry.clone(), machine)
    }

    pub fn select_direction(
        &mut self,
        direction: Direction,
    ) -> Result<ViewSelection, TimetableError> {
        let mut machine = self.machine.clone();
        machine.select_direction(direction);
        self.render(self.entry.clone(), machine)
    }

    pub fn swap_direction(&mut self) -> Result<ViewSelection, TimetableError> {
        let mut machine = self.machine.clone();
        machine.swap_direction();
        self.render(self.entry.clone(), machine)
    }

    /// Swap the clock, e.g. to simulate another time of day, and refresh.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) -> Result<ViewSelection, TimetableError> {
        self.clock = clock;
        self.render(self.entry.clone(), self.machine.clone())
    }

    pub fn selection(&self) -> ViewSelection {
        self.machine.current()
    }

    /// Current time according to the session clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn entry(&self) -> &TimetableEntry {
        &self.entry
    }

    /// Aggregated schedule of the selected slice.
    pub fn schedule(&self) -> &AggregatedSchedule {
        &self.schedule
    }

    /// Classify the selected slice against the session clock.
    pub fn classify_now(&self) -> ClassifiedSchedule {
        let now = DepartureTime::from_clock(&self.clock.now());
        ClassifiedSchedule::build(&self.schedule, now)
    }

    /// Whether highlights are currently being refreshed.
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_armed()
    }

    /// Wait for the refresh to stop; see [`RefreshScheduler::finished`].
    pub async fn refresh_finished(&mut self) -> Option<Result<(), TimetableError>> {
        self.refresh.finished().await
    }

    /// Stop refreshing and discard the session.
    pub fn close(mut self) {
        self.refresh.disarm();
        debug!(line = %self.entry.line_id, "session closed");
    }

    /// Show `machine`'s selection of `entry` and re-arm the refresh.
    ///
    /// Nothing is committed until the slice has aggregated and the bridge
    /// has accepted it, so `entry`, `selection` and `schedule` always
    /// describe the same slice. Bad data leaves the previous view live; a
    /// bridge failure leaves nothing live.
    fn render(
        &mut self,
        entry: Arc<TimetableEntry>,
        machine: ViewStateMachine,
    ) -> Result<ViewSelection, TimetableError> {
        let selection = machine.current();
        let schedule = Arc::new(aggregate(&entry, selection.day_type, selection.direction)?);

        // Old ticks must not highlight a slice that is no longer shown
        self.refresh.disarm();

        debug!(
            line = %entry.line_id,
            %selection,
            departures = schedule.len(),
            "view selected"
        );

        self.bridge.show_view(&ScheduleView {
            entry: &entry,
            selection,
            schedule: &schedule,
        })?;

        self.entry = entry;
        self.machine = machine;
        self.schedule = schedule.clone();

        let line = self.entry.line_id.clone();
        let clock = self.clock.clone();
        let bridge = self.bridge.clone();
        self.refresh.arm(self.config.refresh_interval, move || {
            let now = DepartureTime::from_clock(&clock.now());
            let classified = ClassifiedSchedule::build(&schedule, now);
            bridge.update_highlights(&line, selection, &classified)
        })?;

        Ok(selection)
    }
}
