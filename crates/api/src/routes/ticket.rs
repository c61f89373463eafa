//! Ticket confirmation and export endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use checkout::NotificationSink;
use store::DocumentStore;
use ticket::{TicketConfirmation, TicketError, TicketExport};

use crate::error::ApiError;
use crate::routes::sessions::load_session;
use crate::state::{AppState, Session, lock_session};

/// GET /sessions/:id/ticket — rendered ticket for a completed booking.
#[tracing::instrument(skip(state))]
pub async fn get<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<TicketConfirmation>, ApiError> {
    let (_, handle) = load_session(&state, &id).await?;
    let session = lock_session(&handle);

    let ticket = TicketConfirmation::build(session.booking.workflow().snapshot(), &state.renderer)
        .map_err(|e| no_booking(&session, e))?;
    Ok(Json(ticket))
}

/// GET /sessions/:id/ticket/export — downloadable JSON ticket.
#[tracing::instrument(skip(state))]
pub async fn export<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, handle) = load_session(&state, &id).await?;
    let session = lock_session(&handle);

    let export = TicketExport::from_snapshot(session.booking.workflow().snapshot())
        .map_err(|e| no_booking(&session, e))?;
    let body = export.to_pretty_json()?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

fn no_booking(session: &Session, err: TicketError) -> ApiError {
    if matches!(err, TicketError::NoBooking) {
        session.notifications.error(&err.to_string());
    }
    ApiError::Ticket(err)
}
