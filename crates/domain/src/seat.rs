//! Seat inventory for a screening.
//!
//! A room is a fixed 8×8 grid. Seats are generated fresh for every screening
//! choice, toggled by the user, and discarded when the booking resets or a
//! new screening is chosen.

use common::SeatId;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pricing::{Experience, Lkr, SeatTier, price};

/// Rows in a room, lettered `A` to `H`.
pub const ROWS: u8 = 8;

/// Seats per row, numbered `1` to `8`.
pub const COLUMNS: u8 = 8;

const _: () = assert!(ROWS <= SeatId::MAX_ROWS && COLUMNS < SeatId::MAX_COLUMNS);

/// Most seats a single booking may hold.
pub const MAX_SEATS_PER_BOOKING: usize = 6;

/// A seat in a screening room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Row letter and column number, e.g. `A1`.
    pub id: SeatId,

    /// Seat class.
    pub tier: SeatTier,

    /// Price for the screening's experience.
    pub price: Lkr,

    /// Chosen by the user in this session.
    pub is_selected: bool,

    /// Already taken; supplied from outside and never changed by the user.
    pub is_reserved: bool,
}

impl Seat {
    /// Creates a free, unselected seat priced for the given experience.
    pub fn new(id: SeatId, experience: Experience) -> Self {
        let tier = SeatTier::for_row(id.row());
        Self {
            id,
            tier,
            price: price(experience, tier),
            is_selected: false,
            is_reserved: false,
        }
    }

    /// Returns a copy of this seat marked as selected.
    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    /// Returns a copy of this seat marked as reserved.
    pub fn reserved(mut self) -> Self {
        self.is_reserved = true;
        self
    }

    /// Returns true if the user may toggle this seat.
    pub fn is_available(&self) -> bool {
        !self.is_reserved
    }
}

/// Builds the 64 seats of a room in row-major order.
///
/// Seats listed in `reserved` start reserved; unknown experience labels are
/// priced as 2D.
pub fn generate_seats(experience: &str, reserved: &[SeatId]) -> Vec<Seat> {
    let experience = Experience::resolve(experience);
    let mut seats = Vec::with_capacity(usize::from(ROWS) * usize::from(COLUMNS));

    for row in 0..ROWS {
        for column in 0..COLUMNS {
            let Ok(id) = SeatId::new(row, column) else {
                continue;
            };
            let mut seat = Seat::new(id, experience);
            seat.is_reserved = reserved.contains(&id);
            seats.push(seat);
        }
    }

    seats
}

/// Flips selection of the seat with `id`, unless it is reserved.
///
/// Every other seat is returned unchanged.
pub fn toggle_seat(seats: &[Seat], id: SeatId) -> Vec<Seat> {
    seats
        .iter()
        .map(|seat| {
            if seat.id == id && seat.is_available() {
                Seat {
                    is_selected: !seat.is_selected,
                    ..seat.clone()
                }
            } else {
                seat.clone()
            }
        })
        .collect()
}

/// Sum of the prices of every selected seat.
pub fn total_price(seats: &[Seat]) -> Lkr {
    seats
        .iter()
        .filter(|seat| seat.is_selected)
        .map(|seat| seat.price)
        .sum()
}

/// Checks the per-booking seat count rules.
pub fn check_selection_count(selected: usize) -> Result<(), ValidationError> {
    if selected == 0 {
        return Err(ValidationError::NoSeatsSelected);
    }
    if selected > MAX_SEATS_PER_BOOKING {
        return Err(ValidationError::TooManySeats {
            selected,
            max: MAX_SEATS_PER_BOOKING,
        });
    }
    Ok(())
}

/// Seats that passed the checkout rules, with their recomputed total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSelection {
    seats: Vec<Seat>,
    total_price: Lkr,
}

impl SeatSelection {
    /// Returns the selected seats in row-major order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns the total price.
    pub fn total_price(&self) -> Lkr {
        self.total_price
    }

    /// Splits the selection into its seats and total.
    pub fn into_parts(self) -> (Vec<Seat>, Lkr) {
        (self.seats, self.total_price)
    }
}

/// The seat grid of one screening together with the user's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    experience: Experience,
    seats: Vec<Seat>,
    total_price: Lkr,
}

impl SeatMap {
    /// Generates the grid for a screening.
    pub fn generate(experience: &str, reserved: &[SeatId]) -> Self {
        let seats = generate_seats(experience, reserved);
        Self {
            experience: Experience::resolve(experience),
            total_price: total_price(&seats),
            seats,
        }
    }

    /// Returns the experience the seats are priced for.
    pub fn experience(&self) -> Experience {
        self.experience
    }

    /// Returns every seat in row-major order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Looks up a seat.
    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    /// Toggles one seat and recomputes the total.
    pub fn toggle(&mut self, id: SeatId) {
        self.seats = toggle_seat(&self.seats, id);
        self.total_price = total_price(&self.seats);
    }

    /// Returns the selected seats in row-major order.
    pub fn selected(&self) -> Vec<Seat> {
        self.seats
            .iter()
            .filter(|seat| seat.is_selected)
            .cloned()
            .collect()
    }

    /// Returns the number of selected seats.
    pub fn selected_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_selected).count()
    }

    /// Returns the total of the current selection.
    pub fn total_price(&self) -> Lkr {
        self.total_price
    }

    /// Applies the checkout rules and returns the selection to book.
    pub fn checkout_selection(&self) -> Result<SeatSelection, ValidationError> {
        check_selection_count(self.selected_count())?;
        Ok(SeatSelection {
            seats: self.selected(),
            total_price: self.total_price,
        })
    }
}
