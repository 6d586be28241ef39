//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::{DEFAULT_REFRESH_INTERVAL, SessionConfig};

/// Error returned for an unusable environment value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Runtime configuration for the timetable server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Timetable JSON file, or a directory of them.
    pub data_path: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory of static presentation assets, served under `/static`.
    ///
    /// Relative to the working directory. The repository's `static/` holds
    /// a minimal live view page.
    pub static_dir: PathBuf,

    /// Highlight refresh cadence for live views.
    pub refresh_interval: Duration,
}

impl ServerConfig {
    /// Read `TIMETABLE_DATA`, `TIMETABLE_ADDR`, `TIMETABLE_STATIC_DIR` and
    /// `TIMETABLE_REFRESH_SECS`, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("TIMETABLE_DATA") {
            config.data_path = path.into();
        }

        if let Some(addr) = lookup("TIMETABLE_ADDR") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError {
                var: "TIMETABLE_ADDR",
                value: addr.clone(),
                reason: "expected host:port",
            })?;
        }

        if let Some(dir) = lookup("TIMETABLE_STATIC_DIR") {
            config.static_dir = dir.into();
        }

        if let Some(secs) = lookup("TIMETABLE_REFRESH_SECS") {
            let parsed: u64 = secs.parse().map_err(|_| ConfigError {
                var: "TIMETABLE_REFRESH_SECS",
                value: secs.clone(),
                reason: "expected a whole number of seconds",
            })?;
            if parsed == 0 {
                return Err(ConfigError {
                    var: "TIMETABLE_REFRESH_SECS",
                    value: secs,
                    reason: "must be at least 1",
                });
            }
            config.refresh_interval = Duration::from_secs(parsed);
        }

        Ok(config)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(self.refresh_interval)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/timetables.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}
