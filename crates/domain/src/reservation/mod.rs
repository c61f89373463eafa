//! Booking workflow: steps, snapshot and the reducer that moves between them.

mod action;
mod snapshot;
mod step;
mod workflow;

pub use action::ReservationAction;
pub use snapshot::{Confirmation, ReservationSnapshot, Showtime, TICKET_FIELD_SEPARATOR};
pub use step::WorkflowStep;
pub use workflow::WorkflowState;
