//! Experience tiers, seat tiers and the ticket price table.

use serde::{Deserialize, Serialize};

/// Amount in Sri Lankan rupees. Ticket prices are whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Lkr(u64);

impl Lkr {
    /// Creates an amount from whole rupees.
    pub const fn new(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Returns zero rupees.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in whole rupees.
    pub const fn rupees(&self) -> u64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Lkr {
    /// Formats as `LKR 3,600`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "LKR {grouped}")
    }
}

impl std::ops::Add for Lkr {
    type Output = Lkr;

    fn add(self, rhs: Self) -> Self::Output {
        Lkr(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Lkr {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Lkr {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Lkr::zero(), |acc, amount| acc + amount)
    }
}

/// Screening format a showtime is sold as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Experience {
    #[default]
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "IMAX")]
    Imax,
}

impl Experience {
    /// All experiences in catalog order.
    pub const ALL: [Experience; 3] = [Experience::TwoD, Experience::ThreeD, Experience::Imax];

    /// Looks up an experience by its catalog label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "2D" => Some(Experience::TwoD),
            "3D" => Some(Experience::ThreeD),
            "IMAX" => Some(Experience::Imax),
            _ => None,
        }
    }

    /// Resolves a label for pricing. Unknown labels are priced as 2D.
    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    /// Returns the catalog label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::TwoD => "2D",
            Experience::ThreeD => "3D",
            Experience::Imax => "IMAX",
        }
    }
}

impl std::fmt::Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat class within the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    /// The first two rows.
    Balcony,
    /// Every other row.
    Ground,
}

impl SeatTier {
    /// Tier of a zero-based row index.
    pub fn for_row(row: u8) -> Self {
        if row < BALCONY_ROWS {
            SeatTier::Balcony
        } else {
            SeatTier::Ground
        }
    }

    /// Returns the tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatTier::Balcony => "balcony",
            SeatTier::Ground => "ground",
        }
    }
}

impl std::fmt::Display for SeatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of leading rows sold as balcony seats.
pub const BALCONY_ROWS: u8 = 2;

/// Price of one seat for an experience and seat tier.
pub const fn price(experience: Experience, tier: SeatTier) -> Lkr {
    let rupees = match (experience, tier) {
        (Experience::TwoD, SeatTier::Balcony) => 1200,
        (Experience::TwoD, SeatTier::Ground) => 800,
        (Experience::ThreeD, SeatTier::Balcony) => 2100,
        (Experience::ThreeD, SeatTier::Ground) => 1800,
        (Experience::Imax, SeatTier::Balcony) => 3600,
        (Experience::Imax, SeatTier::Ground) => 3400,
    };
    Lkr::new(rupees)
}

/// Price of one seat for a free-form experience label.
pub fn price_for_label(experience: &str, tier: SeatTier) -> Lkr {
    price(Experience::resolve(experience), tier)
}
