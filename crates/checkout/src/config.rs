use std::time::Duration;

/// Default pause standing in for a payment gateway round-trip.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2500);

/// Default pause between success and the completion signal.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Timing of the checkout sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Pause after entering the processing phase, before the write.
    pub processing_delay: Duration,
    /// Pause after the write succeeded, before returning.
    pub redirect_delay: Duration,
}

impl CheckoutConfig {
    /// Creates a config from delays in milliseconds.
    pub fn from_millis(processing_ms: u64, redirect_ms: u64) -> Self {
        Self {
            processing_delay: Duration::from_millis(processing_ms),
            redirect_delay: Duration::from_millis(redirect_ms),
        }
    }

    /// No pauses at all.
    pub fn immediate() -> Self {
        Self::from_millis(0, 0)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}
