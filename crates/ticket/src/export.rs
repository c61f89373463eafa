//! Ticket export and sharing.

use chrono::NaiveDate;
use domain::ReservationSnapshot;
use serde::{Deserialize, Serialize};

use crate::{Result, TicketError};

/// Title used when sharing a ticket.
pub const SHARE_TITLE: &str = "Movie Ticket - Streamline Cinemas";

/// Downloadable ticket document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketExport {
    pub reservation_id: String,
    pub movie: String,
    pub date: String,
    pub time: String,
    pub seats: Vec<String>,
    pub experience: String,
    pub total_price: u64,
    pub user_email: String,
}

impl TicketExport {
    /// Builds the export of a confirmed snapshot.
    pub fn from_snapshot(snapshot: &ReservationSnapshot) -> Result<Self> {
        let reservation_id = snapshot.reservation_id().ok_or(TicketError::NoBooking)?;

        Ok(Self {
            reservation_id: reservation_id.to_string(),
            movie: snapshot.movie().to_string(),
            date: snapshot.date().to_string(),
            time: snapshot.time().to_string(),
            seats: snapshot.seat_ids().iter().map(ToString::to_string).collect(),
            experience: snapshot.experience().to_string(),
            total_price: snapshot.total_price().rupees(),
            user_email: snapshot
                .user_principal()
                .map(|principal| principal.email().to_string())
                .unwrap_or_default(),
        })
    }

    /// Suggested file name, `ticket-<reservation id>.json`.
    pub fn file_name(&self) -> String {
        format!("ticket-{}.json", self.reservation_id)
    }

    /// Pretty-printed JSON body.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Text shared alongside a ticket.
pub fn share_text(snapshot: &ReservationSnapshot) -> String {
    let seats = snapshot
        .seat_ids()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "I just booked tickets for {}! 🎬\nDate: {}\nTime: {}\nSeats: {seats}",
        snapshot.movie(),
        snapshot.date(),
        snapshot.time()
    )
}

/// Formats a `YYYY-MM-DD` date as `Friday, January 10, 2025`.
///
/// Returns None if the date does not parse.
pub fn long_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
}
