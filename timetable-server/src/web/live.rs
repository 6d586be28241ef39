//! WebSocket live view.
//!
//! Each connection runs one [`TimetableSession`] whose bridge pushes `view`
//! and `highlights` messages to the client. Client messages drive the
//! session's transitions.

use std::sync::Arc;

use axum::{
    extract::{
        self, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::{Clock, FixedClock};
use crate::domain::{DayType, Direction, LineId, TimetableEntry, TimetableError};
use crate::schedule::ClassifiedSchedule;
use crate::session::{RenderBridge, ScheduleView, TimetableSession, ViewSelection};

use super::dto::{ClientMessage, ServerMessage, ViewPayload};
use super::routes::{AppError, find_line, find_line_by_id, parse_selection};
use super::state::AppState;

/// Format accepted for a pinned reference time.
const REFERENCE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Initial slice for a live view.
#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    pub day: Option<String>,
    pub direction: Option<String>,
}

/// Bridge that queues messages for one websocket.
struct ChannelBridge {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ChannelBridge {
    fn send(&self, message: ServerMessage) -> Result<(), TimetableError> {
        self.tx
            .send(message)
            .map_err(|_| TimetableError::Bridge("live view connection closed".into()))
    }
}

impl RenderBridge for ChannelBridge {
    fn show_view(&self, view: &ScheduleView<'_>) -> Result<(), TimetableError> {
        self.send(ServerMessage::View(ViewPayload::from(view)))
    }

    fn update_highlights(
        &self,
        line: &LineId,
        selection: ViewSelection,
        classified: &ClassifiedSchedule,
    ) -> Result<(), TimetableError> {
        self.send(ServerMessage::Highlights {
            line_id: line.clone(),
            selection,
            classified: classified.clone(),
        })
    }
}

/// WebSocket endpoint for a live timetable.
pub(super) async fn live_view(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    extract::Path(line_id): extract::Path<String>,
    Query(query): Query<LiveQuery>,
) -> Result<Response, AppError> {
    // Reject bad requests before upgrading so the client gets a status code
    let entry = find_line(&state, &line_id)?;
    let initial = parse_selection(
        query.day.as_deref(),
        query.direction.as_deref(),
        state.clock.now().date(),
    )?;

    Ok(ws
        .on_upgrade(move |socket| handle_socket(socket, state, entry, initial))
        .into_response())
}

async fn handle_socket(
    socket: WebSocket,
    state: AppState,
    entry: Arc<TimetableEntry>,
    initial: Option<ViewSelection>,
) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let forward_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "failed to encode live view message");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let line = entry.line_id.clone();
    let mut session = match open_session(&state, entry, initial, tx.clone()) {
        Ok(session) => session,
        Err(e) => {
            warn!(%line, error = %e, "live view failed to open");
            let _ = tx.send(ServerMessage::Error {
                message: e.to_string(),
            });
            // Let the forward task flush the error, then finish
            drop(tx);
            let _ = forward_task.await;
            return;
        }
    };
    info!(%line, selection = %session.selection(), "live view opened");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let result = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_message) => apply(&mut session, &state, client_message),
                    Err(e) => Err(AppError::BadRequest {
                        message: format!("Invalid message: {e}"),
                    }),
                };
                if let Err(e) = result {
                    debug!(line = %session.entry().line_id, error = e.message(), "live view request failed");
                    let _ = tx.send(ServerMessage::Error {
                        message: e.message().to_string(),
                    });
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    info!(line = %session.entry().line_id, "live view closed");
    session.close();
    forward_task.abort();
}

fn open_session(
    state: &AppState,
    entry: Arc<TimetableEntry>,
    initial: Option<ViewSelection>,
    tx: mpsc::UnboundedSender<ServerMessage>,
) -> Result<TimetableSession, TimetableError> {
    TimetableSession::open(
        entry,
        state.clock.clone(),
        Arc::new(ChannelBridge { tx }),
        state.session.clone(),
        initial,
    )
}

/// Apply one client request to the session.
fn apply(
    session: &mut TimetableSession,
    state: &AppState,
    message: ClientMessage,
) -> Result<ViewSelection, AppError> {
    let selection = match message {
        ClientMessage::SelectDayType { day_type } => session.select_day_type(day_type)?,
        ClientMessage::SelectDirection { direction } => session.select_direction(direction)?,
        ClientMessage::SwapDirection => session.swap_direction()?,
        ClientMessage::LoadLine {
            line_id,
            day_type,
            direction,
        } => {
            let entry = find_line_by_id(state, &line_id)?;
            let initial = match (day_type, direction) {
                (None, None) => None,
                (day_type, direction) => Some(ViewSelection::new(
                    day_type.unwrap_or_else(|| DayType::from_date(session.now().date())),
                    direction.unwrap_or(Direction::A),
                )),
            };
            session.load_line(entry, initial)?
        }
        ClientMessage::SetReferenceTime { at } => {
            let clock: Arc<dyn Clock> = match at {
                Some(at) => Arc::new(FixedClock(parse_reference_time(&at)?)),
                None => state.clock.clone(),
            };
            session.set_clock(clock)?
        }
    };
    Ok(selection)
}

fn parse_reference_time(at: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(at, REFERENCE_TIME_FORMAT).map_err(|e| AppError::BadRequest {
        message: format!("Invalid reference time {at:?}: {e} (expected YYYY-MM-DDTHH:MM)"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DepartureTime;
    use crate::web::fixtures::{friday_at, sample_state};

    /// Open a session on `line` with a channel bridge.
    fn open(
        line: &str,
        initial: Option<ViewSelection>,
    ) -> (
        AppState,
        TimetableSession,
        mpsc::UnboundedReceiver<ServerMessage>,
    ) {
        let state = sample_state(friday_at(7, 15));
        let entry = find_line(&state, line).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = open_session(&state, entry, initial, tx).unwrap();
        (state, session, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    fn next_of(message: &ServerMessage) -> Option<DepartureTime> {
        match message {
            ServerMessage::Highlights { classified, .. } => classified.next.map(|n| n.time),
            other => panic!("expected highlights, got {other:?}"),
        }
    }

    fn t(s: &str) -> DepartureTime {
        DepartureTime::parse(s).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn opening_sends_view_then_highlights() {
        let (_state, session, mut rx) = open("7", None);
        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 2);
        match &messages[0] {
            ServerMessage::View(view) => {
                assert_eq!(view.line_id.as_str(), "7");
                assert_eq!(view.selection, ViewSelection::new(DayType::Weekday, Direction::A));
                assert_eq!(view.schedule.len(), 4);
            }
            other => panic!("expected view, got {other:?}"),
        }
        assert_eq!(next_of(&messages[1]), Some(t("07:30")));
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn client_messages_drive_transitions() {
        let (state, mut session, mut rx) = open("7", None);
        drain(&mut rx);

        let selection = apply(&mut session, &state, ClientMessage::SwapDirection).unwrap();
        assert_eq!(selection, ViewSelection::new(DayType::Weekday, Direction::B));
        let selection = apply(
            &mut session,
            &state,
            ClientMessage::SelectDayType {
                day_type: DayType::Saturday,
            },
        )
        .unwrap();
        assert_eq!(selection, ViewSelection::new(DayType::Saturday, Direction::B));

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 4);
        assert!(matches!(messages[2], ServerMessage::View(_)));
        assert_eq!(next_of(&messages[3]), Some(t("08:10")));
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn load_line_from_map_click() {
        let (state, mut session, mut rx) = open("7", None);
        drain(&mut rx);

        let selection = apply(
            &mut session,
            &state,
            ClientMessage::LoadLine {
                line_id: LineId::parse("4").unwrap(),
                day_type: None,
                direction: Some(Direction::B),
            },
        )
        .unwrap();
        assert_eq!(selection, ViewSelection::new(DayType::Weekday, Direction::B));
        assert_eq!(session.entry().line_id.as_str(), "4");

        let err = apply(
            &mut session,
            &state,
            ClientMessage::LoadLine {
                line_id: LineId::parse("99").unwrap(),
                day_type: None,
                direction: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        // The failed lookup leaves the current view live
        assert!(session.is_refreshing());
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn reference_time_pins_the_clock() {
        let (state, mut session, mut rx) = open("7", None);
        drain(&mut rx);

        apply(
            &mut session,
            &state,
            ClientMessage::SetReferenceTime {
                at: Some("2024-03-15T07:45".into()),
            },
        )
        .unwrap();
        let messages = drain(&mut rx);
        assert_eq!(next_of(messages.last().unwrap()), Some(t("08:05")));

        apply(&mut session, &state, ClientMessage::SetReferenceTime { at: None }).unwrap();
        let messages = drain(&mut rx);
        assert_eq!(next_of(messages.last().unwrap()), Some(t("07:30")));

        let err = apply(
            &mut session,
            &state,
            ClientMessage::SetReferenceTime {
                at: Some("quarter past seven".into()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_ticks_push_highlights() {
        let (_state, session, mut rx) = open("7", None);
        drain(&mut rx);

        tokio::time::sleep(std::time::Duration::from_secs(121)).await;
        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| matches!(m, ServerMessage::Highlights { .. })));
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn closed_connection_stops_refresh() {
        let (_state, mut session, rx) = open("7", None);
        drop(rx);

        tokio::time::sleep(std::time::Duration::from_secs(61)).await;
        let finished = session.refresh_finished().await;
        assert!(matches!(finished, Some(Err(TimetableError::Bridge(_)))));
        assert!(!session.is_refreshing());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_line_reports_error() {
        let state = sample_state(friday_at(7, 15));
        let entry = find_line(&state, "9").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let err = open_session(&state, entry, None, tx).err().unwrap();
        assert!(matches!(err, TimetableError::MalformedTime { .. }));
        assert!(drain(&mut rx).is_empty());
    }
}
