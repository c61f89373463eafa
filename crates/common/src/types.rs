use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing identifiers from their string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// The seat identifier is not a row letter followed by a column number.
    #[error("Invalid seat id '{0}': expected a row letter followed by a column number")]
    InvalidSeatId(String),

    /// The seat position has no letter-and-number form.
    #[error("Seat position ({row}, {column}) is out of range")]
    SeatOutOfRange { row: u8, column: u8 },

    /// The reservation identifier is empty or contains non-ASCII characters.
    #[error("Invalid reservation id '{0}'")]
    InvalidReservationId(String),
}

/// Identity of a seat within a screening room.
///
/// Rows are lettered from `A` and columns numbered from `1`, so the
/// zero-based position `(0, 0)` renders as `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u8,
    column: u8,
}

impl SeatId {
    /// Rows that have a letter, `A` through `Z`.
    pub const MAX_ROWS: u8 = 26;

    /// Columns that have a number, `1` through `255`.
    pub const MAX_COLUMNS: u8 = 255;

    /// Creates a seat id from zero-based row and column indices.
    pub fn new(row: u8, column: u8) -> Result<Self, IdParseError> {
        if row >= Self::MAX_ROWS || column >= Self::MAX_COLUMNS {
            return Err(IdParseError::SeatOutOfRange { row, column });
        }
        Ok(Self { row, column })
    }

    /// Returns the zero-based row index.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the zero-based column index.
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Returns the row letter (`A` for row 0).
    pub fn row_letter(&self) -> char {
        char::from(b'A' + self.row)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row_letter(), u16::from(self.column) + 1)
    }
}

impl FromStr for SeatId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdParseError::InvalidSeatId(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }

        let number: u16 = chars.as_str().parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        let column = u8::try_from(number - 1).map_err(|_| invalid())?;
        Self::new(letter as u8 - b'A', column).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SeatId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}

/// Booking identifier shown on tickets and used as the storage key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReservationId(String);

impl ReservationId {
    /// Wraps an already formatted reservation id.
    pub fn new(id: impl Into<String>) -> Result<Self, IdParseError> {
        let id = id.into();
        if id.is_empty() || !id.is_ascii() || id.contains('|') {
            return Err(IdParseError::InvalidReservationId(id));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReservationId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ReservationId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReservationId> for String {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

impl AsRef<str> for ReservationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The authenticated identity a booking belongs to (an email address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from an email-like identifier.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Returns the principal's email.
    pub fn email(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
