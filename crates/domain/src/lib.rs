//! Domain layer for the seat reservation system.
//!
//! This crate provides:
//! - The price table for experience and seat tiers
//! - Seat inventory generation, selection toggling and totals
//! - The four-step booking workflow as a pure reducer
//! - The showtime catalog

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod reducer;
pub mod reservation;
pub mod seat;

pub use catalog::{BOOKING_WINDOW_DAYS, Catalog, Movie, booking_dates, normalize_showtime};
pub use error::{DomainError, InvariantViolation, ValidationError};
pub use pricing::{Experience, Lkr, SeatTier, price, price_for_label};
pub use reducer::Reducer;
pub use reservation::{
    Confirmation, ReservationAction, ReservationSnapshot, Showtime, TICKET_FIELD_SEPARATOR,
    WorkflowState, WorkflowStep,
};
pub use seat::{
    COLUMNS, MAX_SEATS_PER_BOOKING, ROWS, Seat, SeatMap, SeatSelection, generate_seats,
    toggle_seat, total_price,
};
