use std::sync::atomic::{AtomicU64, Ordering};

use domain::WorkflowState;

use crate::phase::CheckoutPhase;

static NEXT_RUN: AtomicU64 = AtomicU64::new(1);

/// Handle of one running checkout sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CheckoutRun(u64);

/// One user's booking: the workflow plus the checkout phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSession {
    workflow: WorkflowState,
    phase: CheckoutPhase,
    run: Option<CheckoutRun>,
}

impl BookingSession {
    /// Creates a session at step 1 with checkout collecting input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the booking workflow.
    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    /// Returns the booking workflow for stage transitions.
    ///
    /// Checkout owns the completion step; use the coordinator for it.
    pub fn workflow_mut(&mut self) -> &mut WorkflowState {
        &mut self.workflow
    }

    /// Returns the checkout phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Returns true while a checkout sequence is running for this session.
    pub fn is_checkout_running(&self) -> bool {
        self.run.is_some()
    }

    /// Starts over: empty booking, checkout collecting input.
    ///
    /// A running checkout is cancelled and will not touch the new booking.
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            tracing::info!(phase = %self.phase, "running checkout cancelled by reset");
        }
        self.workflow.reset_reservation();
        self.phase = CheckoutPhase::Collecting;
    }

    pub(crate) fn set_phase(&mut self, phase: CheckoutPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "checkout phase changed");
        self.phase = phase;
    }

    pub(crate) fn begin_run(&mut self) -> CheckoutRun {
        let run = CheckoutRun(NEXT_RUN.fetch_add(1, Ordering::Relaxed));
        self.run = Some(run);
        run
    }

    pub(crate) fn is_current(&self, run: CheckoutRun) -> bool {
        self.run == Some(run)
    }

    /// Ends `run`. Anything short of success returns to collecting input.
    ///
    /// Returns false if the run had already been cancelled.
    pub(crate) fn end_run(&mut self, run: CheckoutRun) -> bool {
        if !self.is_current(run) {
            return false;
        }
        self.run = None;
        if self.phase != CheckoutPhase::Succeeded {
            self.set_phase(CheckoutPhase::Collecting);
        }
        true
    }
}

impl AsMut<BookingSession> for BookingSession {
    fn as_mut(&mut self) -> &mut BookingSession {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ending_a_run_returns_to_collecting() {
        let mut session = BookingSession::new();
        let run = session.begin_run();
        session.set_phase(CheckoutPhase::Processing);

        assert!(session.is_checkout_running());
        assert!(session.end_run(run));
        assert_eq!(session.phase(), CheckoutPhase::Collecting);
        assert!(!session.is_checkout_running());
    }

    #[test]
    fn test_ending_a_run_keeps_success() {
        let mut session = BookingSession::new();
        let run = session.begin_run();
        session.set_phase(CheckoutPhase::Succeeded);

        assert!(session.end_run(run));
        assert_eq!(session.phase(), CheckoutPhase::Succeeded);
    }

    #[test]
    fn test_reset_cancels_the_running_checkout() {
        let mut session = BookingSession::new();
        let run = session.begin_run();
        session.set_phase(CheckoutPhase::Processing);

        session.reset();

        assert!(!session.is_current(run));
        assert!(!session.end_run(run));
        assert_eq!(session, BookingSession::new());
    }
}
