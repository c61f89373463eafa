//! Booking session endpoints: stage transitions and checkout.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use checkout::{CheckoutError, CredentialForm, Notification, NotificationSink};
use common::SeatId;
use domain::{
    DomainError, Lkr, ReservationSnapshot, Seat, SeatMap, Showtime, WorkflowStep,
    normalize_showtime,
};
use serde::{Deserialize, Serialize};
use store::DocumentStore;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{AppState, Session, SharedSession, lock_session};

// -- Request types --

#[derive(Deserialize)]
pub struct ShowtimeRequest {
    #[serde(default)]
    pub movie: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Seats already taken for this screening.
    #[serde(default)]
    pub reserved_seats: Vec<SeatId>,
}

#[derive(Deserialize)]
pub struct StepRequest {
    pub step: u8,
}

// -- Response types --

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub current_step: u8,
    pub step_name: &'static str,
    pub checkout_phase: u8,
    pub checkout_phase_name: &'static str,
    pub snapshot: ReservationSnapshot,
}

#[derive(Serialize)]
pub struct SeatMapResponse {
    pub experience: &'static str,
    pub seats: Vec<Seat>,
    pub selected: Vec<SeatId>,
    pub selected_count: usize,
    pub total_price: Lkr,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub reservation_id: String,
    pub user_principal: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub current_step: u8,
    pub checkout_phase: u8,
}

// -- Handlers --

/// POST /sessions — open a booking session at step 1.
#[tracing::instrument(skip(state))]
pub async fn create<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> (StatusCode, Json<SessionResponse>) {
    let id = state.sessions.create().await;
    tracing::info!(session_id = %id, "booking session opened");
    (
        StatusCode::CREATED,
        Json(session_response(id, &Session::default())),
    )
}

/// GET /sessions/:id — read-only view of the booking.
#[tracing::instrument(skip(state))]
pub async fn get<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, handle) = load_session(&state, &id).await?;
    let session = lock_session(&handle);
    Ok(Json(session_response(id, &session)))
}

/// DELETE /sessions/:id — close a session.
#[tracing::instrument(skip(state))]
pub async fn delete<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let (uuid, _) = load_session(&state, &id).await?;
    if !state.sessions.remove(uuid).await {
        return Err(ApiError::NotFound(format!("Session not found: {id}")));
    }
    tracing::info!(session_id = %uuid, "booking session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/:id/showtime — choose a screening and build its seat grid.
#[tracing::instrument(skip(state, req))]
pub async fn set_showtime<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<ShowtimeRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, handle) = load_session(&state, &id).await?;
    let mut session = lock_session(&handle);

    let time = if req.time.trim().is_empty() {
        req.time
    } else {
        normalize_showtime(&req.time).map_err(|e| reject(&session, e.into()))?
    };

    let mut showtime = Showtime::new(req.movie, req.date, time, req.experience.as_str());
    if let Some(thumbnail) = req.thumbnail {
        showtime = showtime.with_thumbnail(thumbnail);
    }

    session
        .booking
        .workflow_mut()
        .set_showtime(showtime)
        .map_err(|e| reject(&session, e))?;
    session.seat_map = Some(SeatMap::generate(&req.experience, &req.reserved_seats));

    tracing::info!(
        session_id = %id,
        reserved = req.reserved_seats.len(),
        "showtime chosen"
    );
    Ok(Json(session_response(id, &session)))
}

/// GET /sessions/:id/seats — the seat grid with selection flags.
#[tracing::instrument(skip(state))]
pub async fn seats<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SeatMapResponse>, ApiError> {
    let (_, handle) = load_session(&state, &id).await?;
    let session = lock_session(&handle);
    Ok(Json(seat_map_response(seat_map(&session)?)))
}

/// POST /sessions/:id/seats/:seat/toggle — flip one seat's selection.
///
/// Reserved seats are left as they are.
#[tracing::instrument(skip(state))]
pub async fn toggle_seat<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, seat)): Path<(String, String)>,
) -> Result<Json<SeatMapResponse>, ApiError> {
    let seat: SeatId = seat
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("{e}")))?;

    let (_, handle) = load_session(&state, &id).await?;
    let mut session = lock_session(&handle);

    let map = session
        .seat_map
        .as_mut()
        .ok_or_else(|| ApiError::Conflict("No showtime has been chosen".to_string()))?;
    if map.get(seat).is_none() {
        return Err(ApiError::NotFound(format!("Seat not found: {seat}")));
    }
    map.toggle(seat);

    Ok(Json(seat_map_response(map)))
}

/// POST /sessions/:id/seats/confirm — finalize the selection and move to checkout.
#[tracing::instrument(skip(state))]
pub async fn confirm_seats<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, handle) = load_session(&state, &id).await?;
    let mut session = lock_session(&handle);

    let selection = seat_map(&session)?
        .checkout_selection()
        .map_err(|e| reject(&session, e.into()))?;
    session
        .booking
        .workflow_mut()
        .set_selection(selection)
        .map_err(|e| reject(&session, e))?;

    Ok(Json(session_response(id, &session)))
}

/// POST /sessions/:id/step — go back to an earlier step.
#[tracing::instrument(skip(state, req))]
pub async fn set_step<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<StepRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, handle) = load_session(&state, &id).await?;
    let mut session = lock_session(&handle);

    if session.booking.is_checkout_running() || session.booking.phase().is_in_flight() {
        let err = CheckoutError::InProgress(session.booking.phase());
        session.notifications.error(&err.user_message());
        return Err(err.into());
    }

    let step = WorkflowStep::try_from(req.step)
        .map_err(|e| reject(&session, DomainError::from(e)))?;
    session
        .booking
        .workflow_mut()
        .set_step(step)
        .map_err(|e| reject(&session, e))?;
    if step == WorkflowStep::Showtime {
        session.seat_map = None;
    }

    Ok(Json(session_response(id, &session)))
}

/// POST /sessions/:id/checkout — verify identity and persist the booking.
///
/// The session stays readable while checkout runs, so the phase can be
/// polled. A second checkout for the same session is rejected.
#[tracing::instrument(skip(state, form))]
pub async fn checkout<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(form): Json<CredentialForm>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let (_, handle) = load_session(&state, &id).await?;
    let notifications = lock_session(&handle).notifications.clone();

    let coordinator = state.coordinator(notifications);
    let confirmation = coordinator.checkout_shared(&*handle, &form).await?;

    let session = lock_session(&handle);
    Ok(Json(CheckoutResponse {
        reservation_id: confirmation.reservation_id.to_string(),
        user_principal: confirmation.user_principal.email().to_string(),
        timestamp: confirmation.timestamp,
        current_step: session.booking.workflow().current_step().number(),
        checkout_phase: session.booking.phase().number(),
    }))
}

/// POST /sessions/:id/reset — start over from any step.
///
/// A running checkout is cancelled.
#[tracing::instrument(skip(state))]
pub async fn reset<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, handle) = load_session(&state, &id).await?;
    let mut session = lock_session(&handle);
    session.reset();

    Ok(Json(session_response(id, &session)))
}

/// GET /sessions/:id/notifications — messages since the last call.
#[tracing::instrument(skip(state))]
pub async fn notifications<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let (_, handle) = load_session(&state, &id).await?;
    let session = lock_session(&handle);
    Ok(Json(session.notifications.drain()))
}

// -- Helpers --

pub(crate) async fn load_session<S: DocumentStore + Clone + 'static>(
    state: &AppState<S>,
    id: &str,
) -> Result<(Uuid, SharedSession), ApiError> {
    let uuid =
        Uuid::parse_str(id).map_err(|e| ApiError::BadRequest(format!("Invalid session id: {e}")))?;
    let session = state
        .sessions
        .get(uuid)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session not found: {id}")))?;
    Ok((uuid, session))
}

/// Reports a rejected transition to the session's notifications.
fn reject(session: &Session, err: DomainError) -> ApiError {
    if !err.is_validation() {
        tracing::warn!(error = %err, "workflow invariant violated");
    }
    session.notifications.error(&err.user_message());
    ApiError::Domain(err)
}

fn seat_map(session: &Session) -> Result<&SeatMap, ApiError> {
    session
        .seat_map
        .as_ref()
        .ok_or_else(|| ApiError::Conflict("No showtime has been chosen".to_string()))
}

fn session_response(id: Uuid, session: &Session) -> SessionResponse {
    let workflow = session.booking.workflow();
    SessionResponse {
        session_id: id.to_string(),
        current_step: workflow.current_step().number(),
        step_name: workflow.current_step().as_str(),
        checkout_phase: session.booking.phase().number(),
        checkout_phase_name: session.booking.phase().as_str(),
        snapshot: workflow.snapshot().clone(),
    }
}

fn seat_map_response(map: &SeatMap) -> SeatMapResponse {
    let selected = map.selected();
    SeatMapResponse {
        experience: map.experience().as_str(),
        selected: selected.iter().map(|seat| seat.id).collect(),
        selected_count: selected.len(),
        seats: map.seats().to_vec(),
        total_price: map.total_price(),
    }
}
