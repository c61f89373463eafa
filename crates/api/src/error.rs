//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::{CheckoutError, IdentityErrorKind};
use domain::DomainError;
use ticket::TicketError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Request conflicts with the session's current state.
    Conflict(String),
    /// Workflow rule error.
    Domain(DomainError),
    /// Checkout saga error.
    Checkout(CheckoutError),
    /// Ticket rendering error.
    Ticket(TicketError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Ticket(err) => ticket_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, err.user_message()),
        DomainError::Invariant(_) => (StatusCode::CONFLICT, err.to_string()),
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    let status = match &err {
        CheckoutError::NoSeats | CheckoutError::Credentials(_) => StatusCode::BAD_REQUEST,
        CheckoutError::InProgress(_) | CheckoutError::Cancelled => StatusCode::CONFLICT,
        CheckoutError::Identity(e) => match e.kind {
            IdentityErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            IdentityErrorKind::EmailAlreadyInUse => StatusCode::CONFLICT,
            IdentityErrorKind::WeakPassword | IdentityErrorKind::InvalidEmail => {
                StatusCode::BAD_REQUEST
            }
            IdentityErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        },
        CheckoutError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        CheckoutError::Ticket(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CheckoutError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        CheckoutError::Domain(DomainError::Invariant(_)) => StatusCode::CONFLICT,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "checkout failed");
    }
    (status, err.user_message())
}

fn ticket_error_to_response(err: TicketError) -> (StatusCode, String) {
    match &err {
        TicketError::NoBooking => (StatusCode::NOT_FOUND, err.to_string()),
        TicketError::InvalidPayload(_) | TicketError::Id(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        TicketError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        ApiError::Ticket(err)
    }
}
