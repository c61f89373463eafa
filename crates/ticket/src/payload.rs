//! Canonical ticket payload.
//!
//! `STREAMLINE-CINEMA|<reservation id>|<movie>|<date>|<time>|<A1,A2,...>`
//!
//! This string is what the scannable artifact encodes, and the only format a
//! verifier accepts.

use common::{ReservationId, SeatId};
use domain::{ReservationSnapshot, TICKET_FIELD_SEPARATOR};

use crate::{Result, TicketError};

/// Venue tag leading every payload.
pub const VENUE_TAG: &str = "STREAMLINE-CINEMA";

const FIELD_COUNT: usize = 6;

/// The fields a ticket carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    pub reservation_id: ReservationId,
    pub movie: String,
    pub date: String,
    pub time: String,
    pub seats: Vec<SeatId>,
}

impl TicketPayload {
    /// Builds the payload of a confirmed snapshot.
    ///
    /// Seats keep their order in the snapshot.
    pub fn from_snapshot(snapshot: &ReservationSnapshot) -> Result<Self> {
        let reservation_id = snapshot
            .reservation_id()
            .cloned()
            .ok_or(TicketError::NoBooking)?;

        let payload = Self {
            reservation_id,
            movie: snapshot.movie().to_string(),
            date: snapshot.date().to_string(),
            time: snapshot.time().to_string(),
            seats: snapshot.seat_ids(),
        };
        payload.check_fields()?;
        Ok(payload)
    }

    /// Fails if a text field would split the encoded payload.
    fn check_fields(&self) -> Result<()> {
        for (name, value) in [
            ("movie", &self.movie),
            ("date", &self.date),
            ("time", &self.time),
        ] {
            if value.contains(TICKET_FIELD_SEPARATOR) {
                return Err(TicketError::InvalidPayload(format!(
                    "{name} contains '{TICKET_FIELD_SEPARATOR}'"
                )));
            }
        }
        Ok(())
    }

    /// Renders the canonical payload string.
    pub fn encode(&self) -> String {
        let seats = self
            .seats
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{VENUE_TAG}|{}|{}|{}|{}|{seats}",
            self.reservation_id, self.movie, self.date, self.time
        )
    }

    /// Parses a canonical payload string.
    ///
    /// Rejects a wrong venue tag, a field count other than six, empty fields
    /// and an empty or malformed seat list.
    pub fn parse(payload: &str) -> Result<Self> {
        let fields: Vec<&str> = payload.split(TICKET_FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(TicketError::InvalidPayload(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let [venue, id, movie, date, time, seats] = [
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        ];

        if venue != VENUE_TAG {
            return Err(TicketError::InvalidPayload(format!(
                "unknown venue tag {venue:?}"
            )));
        }
        for (name, value) in [("movie", movie), ("date", date), ("time", time)] {
            if value.is_empty() {
                return Err(TicketError::InvalidPayload(format!("empty {name}")));
            }
        }
        if seats.is_empty() {
            return Err(TicketError::InvalidPayload("no seats".to_string()));
        }

        let seats = seats
            .split(',')
            .map(|seat| seat.parse::<SeatId>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            reservation_id: id.parse()?,
            movie: movie.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            seats,
        })
    }
}

impl std::fmt::Display for TicketPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}
