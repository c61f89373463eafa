//! Ticket error types.

use thiserror::Error;

/// Errors that can occur while building or reading ticket artifacts.
#[derive(Debug, Error)]
pub enum TicketError {
    /// The snapshot has no confirmed booking.
    #[error("No booking found")]
    NoBooking,

    /// A payload string is not in the canonical format.
    #[error("Invalid ticket payload: {0}")]
    InvalidPayload(String),

    /// An identifier could not be built or parsed.
    #[error(transparent)]
    Id(#[from] common::IdParseError),

    /// Failed to serialize the ticket export.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ticket operations.
pub type Result<T> = std::result::Result<T, TicketError>;
