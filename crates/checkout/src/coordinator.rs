//! Checkout coordinator for the identity and persistence steps.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use common::Principal;
use domain::Confirmation;
use store::{DocumentStore, ReservationStoreExt};

use crate::config::CheckoutConfig;
use crate::credentials::CredentialForm;
use crate::error::{CheckoutError, Result};
use crate::phase::CheckoutPhase;
use crate::record::snapshot_record;
use crate::services::{IdentityService, NotificationSink};
use crate::session::{BookingSession, CheckoutRun};

const STEP_IDENTITY: &str = "identity";
const STEP_PERSIST: &str = "persist_reservation";

/// Runs `f` on the booking held by `shared`.
///
/// The lock is never held across an await.
fn with_booking<T, R>(shared: &Mutex<T>, f: impl FnOnce(&mut BookingSession) -> R) -> R
where
    T: AsMut<BookingSession>,
{
    let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
    f(guard.as_mut())
}

/// Ends a checkout run when the sequence stops, including when its future
/// is dropped mid-way.
struct RunGuard<'a, T: AsMut<BookingSession>> {
    shared: &'a Mutex<T>,
    run: CheckoutRun,
    settled: bool,
}

impl<T: AsMut<BookingSession>> Drop for RunGuard<'_, T> {
    fn drop(&mut self) {
        let run = self.run;
        let ended = with_booking(self.shared, |booking| booking.end_run(run));
        if ended && !self.settled {
            metrics::counter!("checkout_abandoned_total").increment(1);
            tracing::warn!("checkout abandoned before finishing, returned to collecting");
        }
    }
}

/// Orchestrates checkout for a booking session.
///
/// The coordinator drives a 2-step saga (identity → persistence). Nothing is
/// compensated: a persistence failure returns the session to
/// [`CheckoutPhase::Collecting`] with the workflow untouched, while the
/// account created in the identity step remains.
pub struct CheckoutCoordinator<S, I, N>
where
    S: DocumentStore,
    I: IdentityService,
    N: NotificationSink,
{
    store: S,
    identity: I,
    notifier: N,
    config: CheckoutConfig,
}

impl<S, I, N> CheckoutCoordinator<S, I, N>
where
    S: DocumentStore,
    I: IdentityService,
    N: NotificationSink,
{
    /// Creates a new checkout coordinator.
    pub fn new(store: S, identity: I, notifier: N, config: CheckoutConfig) -> Self {
        Self {
            store,
            identity,
            notifier,
            config,
        }
    }

    /// Returns the notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Runs checkout for a session owned by the caller.
    pub async fn checkout(
        &self,
        session: &mut BookingSession,
        form: &CredentialForm,
    ) -> Result<Confirmation> {
        self.checkout_shared(&Mutex::new(session), form).await
    }

    /// Runs checkout for a session shared with concurrent readers.
    ///
    /// Phase changes are written to the shared session as they happen, and
    /// the lock is only taken for those writes. Every failure is reported
    /// once through the notification sink. On success the workflow is at
    /// step 4 and the session in [`CheckoutPhase::Succeeded`]. If the
    /// returned future is dropped early, the session goes back to
    /// [`CheckoutPhase::Collecting`].
    #[tracing::instrument(skip(self, shared, form), fields(mode = %form.mode))]
    pub async fn checkout_shared<T>(
        &self,
        shared: &Mutex<T>,
        form: &CredentialForm,
    ) -> Result<Confirmation>
    where
        T: AsMut<BookingSession> + Send,
    {
        let run = with_booking(shared, |booking| self.begin(booking, form))?;
        let mut guard = RunGuard {
            shared,
            run,
            settled: false,
        };

        let result = self.run(shared, run, form).await;
        guard.settled = true;
        result
    }

    /// Checks that a sequence may start and claims the session for it.
    fn begin(&self, booking: &mut BookingSession, form: &CredentialForm) -> Result<CheckoutRun> {
        if booking.is_checkout_running() || !booking.phase().can_start() {
            tracing::warn!(phase = %booking.phase(), "checkout re-entry rejected");
            return Err(self.reject(CheckoutError::InProgress(booking.phase())));
        }

        if !booking.workflow().snapshot().has_seats() {
            return Err(self.reject(CheckoutError::NoSeats));
        }

        if booking.workflow().is_completed() {
            return Err(self.reject(CheckoutError::InProgress(CheckoutPhase::Succeeded)));
        }

        form.validate().map_err(|e| self.reject(e.into()))?;

        Ok(booking.begin_run())
    }

    async fn run<T>(
        &self,
        shared: &Mutex<T>,
        run: CheckoutRun,
        form: &CredentialForm,
    ) -> Result<Confirmation>
    where
        T: AsMut<BookingSession> + Send,
    {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = std::time::Instant::now();

        // 1. Identity
        tracing::info!(step = STEP_IDENTITY, "checkout step started");
        let principal = match self
            .identity
            .create_or_authenticate(&form.email, &form.password, form.mode)
            .await
        {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(
                    step = STEP_IDENTITY,
                    kind = e.kind.as_str(),
                    error = %e,
                    "checkout step failed"
                );
                return Err(self.fail(e.into()));
            }
        };
        self.notifier.success(form.mode.success_message());

        // 2. Processing
        with_booking(shared, |booking| {
            if !booking.is_current(run) {
                return Err(CheckoutError::Cancelled);
            }
            booking.set_phase(CheckoutPhase::Processing);
            Ok(())
        })
        .map_err(|e| self.fail(e))?;
        tokio::time::sleep(self.config.processing_delay).await;

        tracing::info!(step = STEP_PERSIST, "checkout step started");
        let confirmation = match self.persist(shared, run, principal).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                metrics::counter!("checkout_orphaned_identities_total").increment(1);
                tracing::warn!(
                    step = STEP_PERSIST,
                    error = %e,
                    email = %form.email,
                    "checkout step failed; identity left without a booking"
                );
                return Err(self.fail(e));
            }
        };

        // 3. Succeeded
        tokio::time::sleep(self.config.redirect_delay).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("checkout_completed_total").increment(1);
        tracing::info!(
            reservation_id = %confirmation.reservation_id,
            duration,
            "checkout completed successfully"
        );

        Ok(confirmation)
    }

    /// Writes the booking, then merges the confirmation into the workflow
    /// and moves to [`CheckoutPhase::Succeeded`].
    ///
    /// The workflow is only touched after the write succeeded.
    async fn persist<T>(
        &self,
        shared: &Mutex<T>,
        run: CheckoutRun,
        principal: Principal,
    ) -> Result<Confirmation>
    where
        T: AsMut<BookingSession> + Send,
    {
        let reservation_id = ticket::generate_reservation_id()?;
        let confirmation = Confirmation::new(reservation_id, principal, Utc::now());

        let record = with_booking(shared, |booking| {
            if !booking.is_current(run) {
                return Err(CheckoutError::Cancelled);
            }
            Ok(snapshot_record(booking.workflow().snapshot(), &confirmation))
        })?;
        self.store.put_reservation(&record).await?;

        with_booking(shared, |booking| {
            if !booking.is_current(run) {
                tracing::warn!(
                    reservation_id = %confirmation.reservation_id,
                    "session reset while the booking was written; stored booking left unlinked"
                );
                return Err(CheckoutError::Cancelled);
            }
            booking.workflow_mut().complete_reservation(
                confirmation.reservation_id.clone(),
                confirmation.user_principal.clone(),
                confirmation.timestamp,
            )?;
            booking.set_phase(CheckoutPhase::Succeeded);
            Ok(())
        })?;

        Ok(confirmation)
    }

    /// Reports a refused start to the user.
    fn reject(&self, error: CheckoutError) -> CheckoutError {
        self.notifier.error(&error.user_message());
        error
    }

    /// Reports a failure to the user and records it.
    fn fail(&self, error: CheckoutError) -> CheckoutError {
        self.notifier.error(&error.user_message());
        metrics::counter!("checkout_failed_total", "stage" => error.stage()).increment(1);
        error
    }
}
