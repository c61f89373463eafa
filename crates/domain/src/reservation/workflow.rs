//! The booking workflow state machine.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::{Principal, ReservationId};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, InvariantViolation};
use crate::pricing::Lkr;
use crate::reducer::Reducer;
use crate::seat::{Seat, SeatSelection, check_selection_count, total_price};

use super::snapshot::TICKET_FIELD_SEPARATOR;
use super::{Confirmation, ReservationAction, ReservationSnapshot, Showtime, WorkflowStep};

/// Current step plus the accumulated booking.
///
/// `current_step` always equals the step the snapshot's data supports; no
/// transition leaves a step ahead of or behind its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkflowState {
    current_step: WorkflowStep,
    snapshot: ReservationSnapshot,
}

impl Reducer for WorkflowState {
    type Action = ReservationAction;
    type Error = DomainError;

    fn reduce(&self, action: Self::Action) -> Result<Self, Self::Error> {
        let action_type = action.action_type();
        let next = match action {
            ReservationAction::SetShowtime(showtime) => self.reduce_showtime(showtime),
            ReservationAction::SetSeats { seats, total_price } => {
                self.reduce_seats(seats, total_price)
            }
            ReservationAction::CompleteReservation(confirmation) => {
                self.reduce_complete(confirmation)
            }
            ReservationAction::ResetReservation => Ok(Self::default()),
            ReservationAction::SetStep(step) => self.reduce_step(step),
        };

        match &next {
            Ok(state) => tracing::debug!(
                action = action_type,
                from = %self.current_step,
                to = %state.current_step,
                "reservation step transition"
            ),
            Err(err) => tracing::debug!(action = action_type, error = %err, "reservation action rejected"),
        }

        next
    }
}

// Query methods
impl WorkflowState {
    /// Creates the initial state: step 1 with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current step.
    pub fn current_step(&self) -> WorkflowStep {
        self.current_step
    }

    /// Returns the accumulated booking.
    pub fn snapshot(&self) -> &ReservationSnapshot {
        &self.snapshot
    }

    /// Returns true if the booking is complete.
    pub fn is_completed(&self) -> bool {
        self.current_step.is_terminal()
    }
}

// Stage transitions
impl WorkflowState {
    /// Chooses a screening and moves to seat selection.
    pub fn set_showtime(&mut self, showtime: Showtime) -> Result<(), DomainError> {
        self.dispatch(ReservationAction::SetShowtime(showtime))
    }

    /// Finalizes seats and moves to checkout.
    pub fn set_seats(&mut self, seats: Vec<Seat>, total_price: Lkr) -> Result<(), DomainError> {
        self.dispatch(ReservationAction::set_seats(seats, total_price))
    }

    /// Finalizes a checked seat selection and moves to checkout.
    pub fn set_selection(&mut self, selection: SeatSelection) -> Result<(), DomainError> {
        self.dispatch(ReservationAction::from_selection(selection))
    }

    /// Merges confirmation fields and completes the booking.
    pub fn complete_reservation(
        &mut self,
        reservation_id: ReservationId,
        user_principal: Principal,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.dispatch(ReservationAction::complete(
            reservation_id,
            user_principal,
            timestamp,
        ))
    }

    /// Returns to the initial empty state. Allowed from any step.
    pub fn reset_reservation(&mut self) {
        *self = Self::default();
    }

    /// Moves to `step`, clearing the data of every later stage.
    pub fn set_step(&mut self, step: WorkflowStep) -> Result<(), DomainError> {
        self.dispatch(ReservationAction::SetStep(step))
    }

    /// Goes back to choosing a showtime. Clears the whole booking.
    pub fn return_to_showtime(&mut self) -> Result<(), DomainError> {
        self.set_step(WorkflowStep::Showtime)
    }

    /// Goes back to choosing seats. Keeps the showtime, clears seats and
    /// confirmation fields.
    pub fn return_to_seat_selection(&mut self) -> Result<(), DomainError> {
        self.set_step(WorkflowStep::Seats)
    }
}

impl WorkflowState {
    fn reduce_showtime(&self, showtime: Showtime) -> Result<Self, DomainError> {
        if let Some(field) = showtime.first_missing_field() {
            return Err(crate::error::ValidationError::MissingShowtimeField { field }.into());
        }
        if let Some(field) = showtime.first_field_containing(TICKET_FIELD_SEPARATOR) {
            return Err(crate::error::ValidationError::ReservedCharacter {
                field,
                separator: TICKET_FIELD_SEPARATOR,
            }
            .into());
        }
        if self.is_completed() {
            return Err(InvariantViolation::AlreadyCompleted.into());
        }

        Ok(Self {
            current_step: WorkflowStep::Seats,
            snapshot: ReservationSnapshot::for_showtime(showtime),
        })
    }

    fn reduce_seats(&self, seats: Vec<Seat>, supplied_total: Lkr) -> Result<Self, DomainError> {
        if self.is_completed() {
            return Err(InvariantViolation::AlreadyCompleted.into());
        }
        if !self.snapshot.has_showtime() {
            return Err(InvariantViolation::MissingShowtime.into());
        }

        check_selection_count(seats.len())?;

        let mut seen = HashSet::with_capacity(seats.len());
        for seat in &seats {
            if seat.is_reserved {
                return Err(InvariantViolation::ReservedSeat(seat.id).into());
            }
            if !seat.is_selected {
                return Err(InvariantViolation::UnselectedSeat(seat.id).into());
            }
            if !seen.insert(seat.id) {
                return Err(InvariantViolation::DuplicateSeat(seat.id).into());
            }
        }

        let expected = total_price(&seats);
        if expected != supplied_total {
            return Err(InvariantViolation::TotalMismatch {
                expected,
                actual: supplied_total,
            }
            .into());
        }

        Ok(Self {
            current_step: WorkflowStep::Checkout,
            snapshot: self
                .snapshot
                .clone()
                .truncated_to(WorkflowStep::Seats)
                .with_seats(seats),
        })
    }

    fn reduce_complete(&self, confirmation: Confirmation) -> Result<Self, DomainError> {
        match self.current_step {
            WorkflowStep::Completed => Err(InvariantViolation::AlreadyCompleted.into()),
            WorkflowStep::Showtime => Err(InvariantViolation::MissingShowtime.into()),
            WorkflowStep::Seats => Err(InvariantViolation::MissingSeats.into()),
            WorkflowStep::Checkout => Ok(Self {
                current_step: WorkflowStep::Completed,
                snapshot: self.snapshot.clone().with_confirmation(confirmation),
            }),
        }
    }

    fn reduce_step(&self, step: WorkflowStep) -> Result<Self, DomainError> {
        let supported = self.snapshot.supported_step();
        if step > supported {
            return Err(InvariantViolation::StepNotSupported {
                requested: step,
                supported,
            }
            .into());
        }

        Ok(Self {
            current_step: step,
            snapshot: self.snapshot.clone().truncated_to(step),
        })
    }
}
