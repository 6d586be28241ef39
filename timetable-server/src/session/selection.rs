//! View selection state machine.
//!
//! A rendered timetable shows one (day-type, direction) slice at a time.
//! Any of the six slices can be reached from any other in one step.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DayType, Direction};

/// The slice of a timetable currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewSelection {
    pub day_type: DayType,
    pub direction: Direction,
}

impl ViewSelection {
    pub fn new(day_type: DayType, direction: Direction) -> Self {
        Self {
            day_type,
            direction,
        }
    }

    /// Today's day-type, direction A.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(DayType::from_date(date), Direction::A)
    }
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day_type, self.direction)
    }
}

/// Tracks the active slice for one rendered timetable.
///
/// Created fresh for every loaded line; never reset in place.
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    current: ViewSelection,
}

impl ViewStateMachine {
    /// Start at `initial`, or at today's default when none is given.
    pub fn new(today: NaiveDate, initial: Option<ViewSelection>) -> Self {
        Self {
            current: initial.unwrap_or_else(|| ViewSelection::for_date(today)),
        }
    }

    pub fn current(&self) -> ViewSelection {
        self.current
    }

    /// Switch day-type, keeping the direction.
    pub fn select_day_type(&mut self, day_type: DayType) -> ViewSelection {
        self.current.day_type = day_type;
        self.current
    }

    /// Switch direction, keeping the day-type.
    pub fn select_direction(&mut self, direction: Direction) -> ViewSelection {
        self.current.direction = direction;
        self.current
    }

    pub fn swap_direction(&mut self) -> ViewSelection {
        self.select_direction(self.current.direction.other())
    }
}
