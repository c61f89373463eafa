//! Checkout phase machine.

use serde::{Deserialize, Serialize};

/// Where a checkout sequence stands.
///
/// Phase transitions:
/// ```text
/// Collecting ──► Processing ──► Succeeded
///      ▲              │
///      └──────────────┘ (persistence failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Collecting credentials and payment details.
    #[default]
    Collecting,

    /// Identity verified; the booking is being written.
    Processing,

    /// Booking persisted (terminal state).
    Succeeded,
}

impl CheckoutPhase {
    /// Returns the phase number, 1 through 3.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutPhase::Collecting => 1,
            CheckoutPhase::Processing => 2,
            CheckoutPhase::Succeeded => 3,
        }
    }

    /// Returns true if a new checkout sequence may start.
    pub fn can_start(&self) -> bool {
        matches!(self, CheckoutPhase::Collecting)
    }

    /// Returns true while a sequence is running or has finished.
    pub fn is_in_flight(&self) -> bool {
        !self.can_start()
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutPhase::Succeeded)
    }

    /// Returns the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Collecting => "Collecting",
            CheckoutPhase::Processing => "Processing",
            CheckoutPhase::Succeeded => "Succeeded",
        }
    }
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_collecting() {
        assert_eq!(CheckoutPhase::default(), CheckoutPhase::Collecting);
        assert_eq!(CheckoutPhase::default().number(), 1);
    }

    #[test]
    fn test_can_start() {
        assert!(CheckoutPhase::Collecting.can_start());
        assert!(!CheckoutPhase::Processing.can_start());
        assert!(!CheckoutPhase::Succeeded.can_start());
    }

    #[test]
    fn test_is_terminal() {
        assert!(!CheckoutPhase::Collecting.is_terminal());
        assert!(!CheckoutPhase::Processing.is_terminal());
        assert!(CheckoutPhase::Succeeded.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckoutPhase::Processing.to_string(), "Processing");
        assert_eq!(CheckoutPhase::Succeeded.number(), 3);
    }
}
