//! Application state for the web layer.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::session::SessionConfig;
use crate::store::TimetableStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// All loaded lines
    pub store: Arc<TimetableStore>,

    /// Clock that new live views start from
    pub clock: Arc<dyn Clock>,

    /// Settings for live view sessions
    pub session: SessionConfig,
}

impl AppState {
    /// Create a new app state reading the host clock.
    pub fn new(store: TimetableStore, session: SessionConfig) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), session)
    }

    pub fn with_clock(store: TimetableStore, clock: Arc<dyn Clock>, session: SessionConfig) -> Self {
        Self {
            store: Arc::new(store),
            clock,
            session,
        }
    }
}
