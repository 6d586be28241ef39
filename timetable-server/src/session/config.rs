//! Session configuration.

use std::time::Duration;

use super::refresh::DEFAULT_REFRESH_INTERVAL;

/// Configuration for a timetable session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How often highlights are recomputed while a timetable is shown.
    pub refresh_interval: Duration,
}

impl SessionConfig {
    pub fn new(refresh_interval: Duration) -> Self {
        Self { refresh_interval }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}
