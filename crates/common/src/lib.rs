//! Identifiers shared by every crate in the booking workspace.

mod types;

pub use types::{IdParseError, Principal, ReservationId, SeatId};
