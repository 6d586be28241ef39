//! Periodic highlight refresh.
//!
//! A displayed timetable stays current by re-running classification every
//! minute. The scheduler owns at most one pending refresh; arming always
//! retires the previous one first, so repeated renders can never stack up
//! concurrent timers.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::domain::TimetableError;

/// Production refresh cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a spawned refresh task.
///
/// The task ends only when cancelled or when a tick fails.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<Result<(), TimetableError>>,
}

impl RefreshHandle {
    /// Whether the task is still ticking.
    pub fn is_live(&self) -> bool {
        !self.task.is_finished()
    }

    fn cancel(self) {
        self.task.abort();
    }
}

/// Owner of the single pending refresh for one rendered timetable.
///
/// Must be armed from within a tokio runtime. Dropping the scheduler
/// disarms it.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    handle: Option<RefreshHandle>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `tick` now, then every `interval` until disarmed.
    ///
    /// Any previously armed refresh is cancelled first. If the immediate
    /// tick fails its error is returned and nothing is armed. A later tick
    /// failure stops the refresh for good; it is never retried, and the
    /// error is available from [`RefreshScheduler::finished`].
    pub fn arm<F>(&mut self, interval: Duration, mut tick: F) -> Result<(), TimetableError>
    where
        F: FnMut() -> Result<(), TimetableError> + Send + 'static,
    {
        self.disarm();
        tick()?;

        // tokio rejects a zero period
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                trace!("refresh tick");
                if let Err(e) = tick() {
                    warn!(error = %e, "refresh tick failed, stopping");
                    return Err(e);
                }
            }
        });

        debug!(interval_ms = interval.as_millis() as u64, "refresh armed");
        self.handle = Some(RefreshHandle { task });
        Ok(())
    }

    /// Cancel the pending refresh, if any.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            debug!("refresh disarmed");
        }
    }

    /// Whether a refresh is armed and still ticking.
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(RefreshHandle::is_live)
    }

    /// Wait for the armed refresh to stop and return how it ended.
    ///
    /// Returns `None` when nothing is armed. A healthy refresh only stops
    /// when a tick fails, so awaiting it otherwise waits indefinitely.
    pub async fn finished(&mut self) -> Option<Result<(), TimetableError>> {
        let handle = self.handle.take()?;
        match handle.task.await {
            Ok(result) => Some(result),
            Err(e) if e.is_cancelled() => Some(Ok(())),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
