//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{self, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::domain::{DayType, DepartureTime, Direction, LineId, TimetableEntry, TimetableError};
use crate::schedule::{ClassifiedSchedule, aggregate};
use crate::session::{ScheduleView, ViewSelection};

use super::dto::*;
use super::live::live_view;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(list_lines))
        .route("/api/lines/:line_id", get(line_detail))
        .route("/api/lines/:line_id/schedule", get(line_schedule))
        .route("/api/lines/:line_id/live", get(live_view))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every loaded line.
async fn list_lines(State(state): State<AppState>) -> Json<LineListResponse> {
    let lines = state
        .store
        .lines()
        .map(|entry| LineSummary::from(entry.as_ref()))
        .collect();
    Json(LineListResponse { lines })
}

/// Names, directions and stations of one line.
async fn line_detail(
    State(state): State<AppState>,
    extract::Path(line_id): extract::Path<String>,
) -> Result<Json<LineDetail>, AppError> {
    let entry = find_line(&state, &line_id)?;
    Ok(Json(LineDetail::from(entry.as_ref())))
}

/// Classified departures of one slice at a single instant.
async fn line_schedule(
    State(state): State<AppState>,
    extract::Path(line_id): extract::Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let entry = find_line(&state, &line_id)?;
    let now = state.clock.now();

    let selection = parse_selection(query.day.as_deref(), query.direction.as_deref(), now.date())?
        .unwrap_or_else(|| ViewSelection::for_date(now.date()));

    let at = match query.at.as_deref() {
        Some(at) => DepartureTime::parse(at).map_err(|e| AppError::BadRequest {
            message: format!("Invalid reference time: {e}"),
        })?,
        None => DepartureTime::from_clock(&now),
    };

    let schedule = aggregate(&entry, selection.day_type, selection.direction)?;
    let highlights = ClassifiedSchedule::build(&schedule, at);

    debug!(
        line = %entry.line_id,
        %selection,
        %at,
        departures = schedule.len(),
        "schedule requested"
    );

    let view = ScheduleView {
        entry: &entry,
        selection,
        schedule: &schedule,
    };
    Ok(Json(ScheduleResponse {
        view: ViewPayload::from(&view),
        highlights,
    }))
}

/// Look up a line by its raw path segment.
pub(super) fn find_line(state: &AppState, raw: &str) -> Result<Arc<TimetableEntry>, AppError> {
    let id = LineId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid line id {raw:?}: {e}"),
    })?;
    find_line_by_id(state, &id)
}

pub(super) fn find_line_by_id(
    state: &AppState,
    id: &LineId,
) -> Result<Arc<TimetableEntry>, AppError> {
    state.store.get(id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown line: {id}"),
    })
}

/// Parse optional day type and direction parameters.
///
/// Returns `None` when neither is given. A lone parameter is completed with
/// today's day type or direction A.
pub(super) fn parse_selection(
    day: Option<&str>,
    direction: Option<&str>,
    today: NaiveDate,
) -> Result<Option<ViewSelection>, AppError> {
    if day.is_none() && direction.is_none() {
        return Ok(None);
    }

    let day_type = match day {
        Some(day) => day.parse::<DayType>().map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
        None => DayType::from_date(today),
    };
    let direction = match direction {
        Some(direction) => direction.parse::<Direction>().map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
        None => Direction::A,
    };

    Ok(Some(ViewSelection::new(day_type, direction)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TimetableError> for AppError {
    fn from(e: TimetableError) -> Self {
        // Malformed times are a data problem, not a client one
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
