//! Actions accepted by the booking workflow.

use chrono::{DateTime, Utc};
use common::{Principal, ReservationId};
use serde::{Deserialize, Serialize};

use crate::pricing::Lkr;
use crate::seat::{Seat, SeatSelection};

use super::{Confirmation, Showtime, WorkflowStep};

/// A stage transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ReservationAction {
    /// A screening was chosen.
    SetShowtime(Showtime),

    /// Seats were finalized for checkout.
    SetSeats { seats: Vec<Seat>, total_price: Lkr },

    /// Checkout persisted the booking.
    CompleteReservation(Confirmation),

    /// Start over with an empty booking.
    ResetReservation,

    /// Move to a step the current data supports, clearing later stages.
    SetStep(WorkflowStep),
}

impl ReservationAction {
    /// Returns the action name, used in logs.
    pub fn action_type(&self) -> &'static str {
        match self {
            ReservationAction::SetShowtime(_) => "SetShowtime",
            ReservationAction::SetSeats { .. } => "SetSeats",
            ReservationAction::CompleteReservation(_) => "CompleteReservation",
            ReservationAction::ResetReservation => "ResetReservation",
            ReservationAction::SetStep(_) => "SetStep",
        }
    }

    /// Creates a `SetShowtime` action.
    pub fn set_showtime(showtime: Showtime) -> Self {
        ReservationAction::SetShowtime(showtime)
    }

    /// Creates a `SetSeats` action.
    pub fn set_seats(seats: Vec<Seat>, total_price: Lkr) -> Self {
        ReservationAction::SetSeats { seats, total_price }
    }

    /// Creates a `SetSeats` action from a checked selection.
    pub fn from_selection(selection: SeatSelection) -> Self {
        let (seats, total_price) = selection.into_parts();
        ReservationAction::SetSeats { seats, total_price }
    }

    /// Creates a `CompleteReservation` action.
    pub fn complete(
        reservation_id: ReservationId,
        user_principal: Principal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        ReservationAction::CompleteReservation(Confirmation::new(
            reservation_id,
            user_principal,
            timestamp,
        ))
    }
}
