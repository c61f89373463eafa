//! Booking workflow steps.

use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

/// The stage a booking session is in.
///
/// Step transitions:
/// ```text
/// Showtime(1) ──► Seats(2) ──► Checkout(3) ──► Completed(4)
///     ▲              ▲             │               │
///     └──────────────┴─────────────┴─── reset / step override
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum WorkflowStep {
    /// Choosing a movie, date, time and experience.
    #[default]
    Showtime,

    /// Showtime chosen, choosing seats.
    Seats,

    /// Seats finalized, at checkout.
    Checkout,

    /// Booking persisted and confirmed (terminal state).
    Completed,
}

impl WorkflowStep {
    /// Returns the step number (1..=4).
    pub fn number(&self) -> u8 {
        match self {
            WorkflowStep::Showtime => 1,
            WorkflowStep::Seats => 2,
            WorkflowStep::Checkout => 3,
            WorkflowStep::Completed => 4,
        }
    }

    /// Returns true if this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStep::Completed)
    }

    /// Returns the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Showtime => "Showtime",
            WorkflowStep::Seats => "Seats",
            WorkflowStep::Checkout => "Checkout",
            WorkflowStep::Completed => "Completed",
        }
    }
}

impl TryFrom<u8> for WorkflowStep {
    type Error = InvariantViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WorkflowStep::Showtime),
            2 => Ok(WorkflowStep::Seats),
            3 => Ok(WorkflowStep::Checkout),
            4 => Ok(WorkflowStep::Completed),
            other => Err(InvariantViolation::InvalidStep(other)),
        }
    }
}

impl From<WorkflowStep> for u8 {
    fn from(step: WorkflowStep) -> Self {
        step.number()
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_is_showtime() {
        assert_eq!(WorkflowStep::default(), WorkflowStep::Showtime);
    }

    #[test]
    fn test_numbers_roundtrip() {
        for n in 1..=4u8 {
            let step = WorkflowStep::try_from(n).unwrap();
            assert_eq!(step.number(), n);
        }
        assert_eq!(
            WorkflowStep::try_from(0),
            Err(InvariantViolation::InvalidStep(0))
        );
        assert_eq!(
            WorkflowStep::try_from(5),
            Err(InvariantViolation::InvalidStep(5))
        );
    }

    #[test]
    fn test_steps_are_ordered() {
        assert!(WorkflowStep::Showtime < WorkflowStep::Seats);
        assert!(WorkflowStep::Seats < WorkflowStep::Checkout);
        assert!(WorkflowStep::Checkout < WorkflowStep::Completed);
    }

    #[test]
    fn test_terminal_step() {
        assert!(!WorkflowStep::Showtime.is_terminal());
        assert!(!WorkflowStep::Checkout.is_terminal());
        assert!(WorkflowStep::Completed.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkflowStep::Seats.to_string(), "2 (Seats)");
        assert_eq!(serde_json::to_string(&WorkflowStep::Completed).unwrap(), "4");
    }
}
