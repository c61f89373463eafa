//! Domain error types.

use common::SeatId;
use thiserror::Error;

use crate::pricing::Lkr;
use crate::reservation::WorkflowStep;

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Stage input was missing or broke a booking rule. Recoverable by the user.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A caller broke a workflow invariant. This is a programming error.
    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl DomainError {
    /// Returns true for user-recoverable validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    /// Returns the message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation(err) => err.user_message().to_string(),
            DomainError::Invariant(err) => err.to_string(),
        }
    }
}

/// Missing or invalid stage input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A showtime field was left empty.
    #[error("Showtime field '{field}' is required")]
    MissingShowtimeField { field: &'static str },

    /// A showtime field contains the ticket field separator.
    #[error("Showtime field '{field}' must not contain '{separator}'")]
    ReservedCharacter {
        field: &'static str,
        separator: char,
    },

    /// A showtime string could not be read as `HH:MM`.
    #[error("Invalid showtime '{0}'")]
    InvalidShowtime(String),

    /// No seat is selected.
    #[error("No seats selected")]
    NoSeatsSelected,

    /// More seats are selected than one booking allows.
    #[error("Too many seats selected: {selected} (maximum {max})")]
    TooManySeats { selected: usize, max: usize },
}

impl ValidationError {
    /// Returns the user-facing notification text.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingShowtimeField { .. } => "Please select all options.",
            ValidationError::ReservedCharacter { .. } => {
                "Showtime details must not contain the '|' character."
            }
            ValidationError::InvalidShowtime(_) => "Please select a valid showtime.",
            ValidationError::NoSeatsSelected => "Please select at least one seat",
            ValidationError::TooManySeats { .. } => "You can select up to 6 seats",
        }
    }
}

/// Broken workflow invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A reserved seat was passed as part of a selection.
    #[error("Seat {0} is reserved and cannot be selected")]
    ReservedSeat(SeatId),

    /// A seat passed as part of a selection is not marked selected.
    #[error("Seat {0} is not marked as selected")]
    UnselectedSeat(SeatId),

    /// The same seat appears twice in a selection.
    #[error("Seat {0} appears more than once")]
    DuplicateSeat(SeatId),

    /// The supplied total does not match the sum of the seat prices.
    #[error("Total price {actual} does not match seat prices {expected}")]
    TotalMismatch { expected: Lkr, actual: Lkr },

    /// A later stage was attempted before a showtime was chosen.
    #[error("No showtime has been chosen")]
    MissingShowtime,

    /// Confirmation was attempted before seats were chosen.
    #[error("No seats have been chosen")]
    MissingSeats,

    /// The booking is already complete; reset before changing it.
    #[error("Reservation is already completed")]
    AlreadyCompleted,

    /// A step override asked for a step the snapshot has no data for.
    #[error("Cannot move to step {requested}: booking data only supports step {supported}")]
    StepNotSupported {
        requested: WorkflowStep,
        supported: WorkflowStep,
    },

    /// A step number outside 1..=4.
    #[error("Invalid workflow step {0}")]
    InvalidStep(u8),
}

/// Convenience type alias for domain results.
pub type Result<T> = std::result::Result<T, DomainError>;
