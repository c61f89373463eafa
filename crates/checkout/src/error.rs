//! Checkout error types.

use domain::DomainError;
use store::StoreError;
use thiserror::Error;
use ticket::TicketError;

use crate::credentials::CredentialError;
use crate::phase::CheckoutPhase;
use crate::services::IdentityError;

/// Message shown when the booking could not be written.
pub const PERSISTENCE_FAILED_MESSAGE: &str = "Payment failed. Please try again.";

/// Message shown when checkout starts without seats.
pub const NO_SEATS_MESSAGE: &str = "Please select seats first";

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The booking has no seats yet.
    #[error("Please select seats first")]
    NoSeats,

    /// A checkout sequence is already running or has finished.
    #[error("Checkout already in progress (phase {0})")]
    InProgress(CheckoutPhase),

    /// The session was reset while its checkout was running.
    #[error("Checkout was cancelled")]
    Cancelled,

    /// The credential form failed validation.
    #[error("Invalid credentials form: {0}")]
    Credentials(#[from] CredentialError),

    /// The identity service refused the request.
    #[error("Identity service error: {0}")]
    Identity(#[from] IdentityError),

    /// The reservation id could not be generated.
    #[error("Ticket error: {0}")]
    Ticket(#[from] TicketError),

    /// The booking could not be written.
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// The workflow rejected the confirmation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl CheckoutError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::NoSeats => NO_SEATS_MESSAGE.to_string(),
            CheckoutError::InProgress(_) => "Checkout is already in progress".to_string(),
            CheckoutError::Cancelled => "Checkout was cancelled".to_string(),
            CheckoutError::Credentials(e) => e.user_message(),
            CheckoutError::Identity(e) => e.user_message(),
            CheckoutError::Ticket(_) | CheckoutError::Persistence(_) => {
                PERSISTENCE_FAILED_MESSAGE.to_string()
            }
            CheckoutError::Domain(e) => e.user_message(),
        }
    }

    /// Checkout stage that failed, used as a metrics label.
    pub fn stage(&self) -> &'static str {
        match self {
            CheckoutError::NoSeats | CheckoutError::InProgress(_) | CheckoutError::Cancelled => {
                "guard"
            }
            CheckoutError::Credentials(_) => "validation",
            CheckoutError::Identity(_) => "identity",
            CheckoutError::Ticket(_) | CheckoutError::Persistence(_) => "persistence",
            CheckoutError::Domain(_) => "workflow",
        }
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
