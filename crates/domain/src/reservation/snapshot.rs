//! The accumulated booking record.

use chrono::{DateTime, Utc};
use common::{Principal, ReservationId, SeatId};
use serde::{Deserialize, Serialize};

use crate::pricing::Lkr;
use crate::seat::Seat;

use super::WorkflowStep;

/// Separator between fields of an encoded ticket; never allowed in showtime fields.
pub const TICKET_FIELD_SEPARATOR: char = '|';

/// Movie, date, time and experience chosen at step 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Showtime {
    pub movie: String,
    pub date: String,
    pub time: String,
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Showtime {
    /// Creates a showtime without a thumbnail.
    pub fn new(
        movie: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        experience: impl Into<String>,
    ) -> Self {
        Self {
            movie: movie.into(),
            date: date.into(),
            time: time.into(),
            experience: experience.into(),
            thumbnail: None,
        }
    }

    /// Attaches a poster thumbnail reference.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    fn fields(&self) -> [(&'static str, &String); 4] {
        [
            ("movie", &self.movie),
            ("date", &self.date),
            ("time", &self.time),
            ("experience", &self.experience),
        ]
    }

    /// Returns the name of the first empty required field.
    pub(crate) fn first_missing_field(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }

    /// Returns the name of the first field containing `separator`.
    pub(crate) fn first_field_containing(&self, separator: char) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| value.contains(separator))
            .map(|(field, _)| field)
    }
}

/// Identity and confirmation fields merged at completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub reservation_id: ReservationId,
    pub user_principal: Principal,
    pub timestamp: DateTime<Utc>,
}

impl Confirmation {
    /// Creates a confirmation.
    pub fn new(
        reservation_id: ReservationId,
        user_principal: Principal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            reservation_id,
            user_principal,
            timestamp,
        }
    }
}

/// Read-only view of the booking built up across the workflow steps.
///
/// Fields are added stage by stage and only cleared by a reset or a move to
/// an earlier step. `total_price` is always the sum of the held seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReservationSnapshot {
    movie: String,
    date: String,
    time: String,
    experience: String,
    movie_thumbnail: Option<String>,
    seats: Vec<Seat>,
    total_price: Lkr,
    reservation_id: Option<ReservationId>,
    user_principal: Option<Principal>,
    timestamp: Option<DateTime<Utc>>,
}

// Query methods
impl ReservationSnapshot {
    /// Returns the movie title.
    pub fn movie(&self) -> &str {
        &self.movie
    }

    /// Returns the screening date.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the screening time.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the experience label.
    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// Returns the poster thumbnail, if one was supplied.
    pub fn movie_thumbnail(&self) -> Option<&str> {
        self.movie_thumbnail.as_deref()
    }

    /// Returns the booked seats in selection order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns the ids of the booked seats.
    pub fn seat_ids(&self) -> Vec<SeatId> {
        self.seats.iter().map(|seat| seat.id).collect()
    }

    /// Returns the total price of the booked seats.
    pub fn total_price(&self) -> Lkr {
        self.total_price
    }

    /// Returns the reservation id once the booking is confirmed.
    pub fn reservation_id(&self) -> Option<&ReservationId> {
        self.reservation_id.as_ref()
    }

    /// Returns the principal the booking belongs to.
    pub fn user_principal(&self) -> Option<&Principal> {
        self.user_principal.as_ref()
    }

    /// Returns when the booking was confirmed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Returns true once a showtime has been chosen.
    pub fn has_showtime(&self) -> bool {
        !self.movie.is_empty()
    }

    /// Returns true once seats have been chosen.
    pub fn has_seats(&self) -> bool {
        !self.seats.is_empty()
    }

    /// Returns true once the booking has been confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.reservation_id.is_some()
    }

    /// The furthest step the data held here can support.
    pub fn supported_step(&self) -> WorkflowStep {
        if self.is_confirmed() {
            WorkflowStep::Completed
        } else if self.has_seats() {
            WorkflowStep::Checkout
        } else if self.has_showtime() {
            WorkflowStep::Seats
        } else {
            WorkflowStep::Showtime
        }
    }
}

// Transitions, driven by the workflow reducer
impl ReservationSnapshot {
    /// Starts a booking for a new screening. Earlier seats are dropped.
    pub(super) fn for_showtime(showtime: Showtime) -> Self {
        Self {
            movie: showtime.movie,
            date: showtime.date,
            time: showtime.time,
            experience: showtime.experience,
            movie_thumbnail: showtime.thumbnail,
            ..Self::default()
        }
    }

    /// Replaces the seat list; the total is recomputed from it.
    pub(super) fn with_seats(mut self, seats: Vec<Seat>) -> Self {
        self.total_price = crate::seat::total_price(&seats);
        self.seats = seats;
        self
    }

    pub(super) fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.reservation_id = Some(confirmation.reservation_id);
        self.user_principal = Some(confirmation.user_principal);
        self.timestamp = Some(confirmation.timestamp);
        self
    }

    /// Drops every field that belongs to a stage after `step`.
    pub(super) fn truncated_to(mut self, step: WorkflowStep) -> Self {
        if step < WorkflowStep::Completed {
            self.reservation_id = None;
            self.user_principal = None;
            self.timestamp = None;
        }
        if step < WorkflowStep::Checkout {
            self.seats.clear();
            self.total_price = Lkr::zero();
        }
        if step < WorkflowStep::Seats {
            return Self::default();
        }
        self
    }
}
