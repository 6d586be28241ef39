//! Web layer for the timetable server.
//!
//! Serves line data and one-shot schedules over HTTP, and live timetables
//! over WebSocket.

mod dto;
mod live;
mod routes;
mod state;

pub use dto::*;
pub use live::LiveQuery;
pub use routes::{AppError, create_router};
pub use state::AppState;
