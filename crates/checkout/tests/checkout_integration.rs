//! Integration tests for the checkout saga.

use std::sync::Mutex;
use std::time::Duration;

use checkout::{
    BookingSession, CheckoutConfig, CheckoutCoordinator, CheckoutError, CheckoutPhase,
    CredentialForm, IdentityErrorKind, InMemoryIdentityService, InMemoryNotificationSink,
    NotificationKind,
};
use domain::{SeatMap, Showtime, WorkflowStep};
use store::{InMemoryDocumentStore, ReservationStoreExt};

type TestCoordinator =
    CheckoutCoordinator<InMemoryDocumentStore, InMemoryIdentityService, InMemoryNotificationSink>;

struct TestHarness {
    coordinator: TestCoordinator,
    store: InMemoryDocumentStore,
    identity: InMemoryIdentityService,
    notifications: InMemoryNotificationSink,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_identity(InMemoryIdentityService::new())
    }

    fn with_identity(identity: InMemoryIdentityService) -> Self {
        let store = InMemoryDocumentStore::new();
        let notifications = InMemoryNotificationSink::new();

        let coordinator = CheckoutCoordinator::new(
            store.clone(),
            identity.clone(),
            notifications.clone(),
            CheckoutConfig::immediate(),
        );

        Self {
            coordinator,
            store,
            identity,
            notifications,
        }
    }

    fn messages(&self) -> Vec<(NotificationKind, String)> {
        self.notifications
            .notifications()
            .into_iter()
            .map(|n| (n.kind, n.message))
            .collect()
    }
}

fn session_at_checkout() -> BookingSession {
    let mut map = SeatMap::generate("IMAX", &["A2".parse().unwrap()]);
    map.toggle("A1".parse().unwrap());
    map.toggle("C5".parse().unwrap());

    let mut session = BookingSession::new();
    session
        .workflow_mut()
        .set_showtime(Showtime::new("Inception", "2025-01-10", "18:00", "IMAX"))
        .unwrap();
    session
        .workflow_mut()
        .set_selection(map.checkout_selection().unwrap())
        .unwrap();
    session
}

fn register_form() -> CredentialForm {
    CredentialForm::register("a@b.com", "secret", "secret")
}

mod happy_path {
    use super::*;

    #[tokio::test]
    async fn test_register_and_book() {
        let h = TestHarness::new();
        let mut session = session_at_checkout();

        let confirmation = h
            .coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap();

        assert_eq!(session.phase(), CheckoutPhase::Succeeded);
        assert_eq!(session.workflow().current_step(), WorkflowStep::Completed);

        let snapshot = session.workflow().snapshot();
        assert_eq!(snapshot.reservation_id(), Some(&confirmation.reservation_id));
        assert_eq!(snapshot.user_principal().map(|p| p.email()), Some("a@b.com"));
        assert!(ticket::is_reservation_id_format(
            confirmation.reservation_id.as_str()
        ));

        let record = h
            .store
            .get_reservation(&confirmation.reservation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.movie, "Inception");
        assert_eq!(record.seats, vec!["A1", "C5"]);
        assert_eq!(record.total_price, 3600 + 3400);
        assert_eq!(record.user_principal, "a@b.com");
        assert_eq!(record.timestamp, confirmation.timestamp);

        assert!(h.identity.has_account("a@b.com"));
        assert_eq!(
            h.messages(),
            vec![(
                NotificationKind::Success,
                "Account created successfully!".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_login_and_book() {
        let h = TestHarness::with_identity(
            InMemoryIdentityService::new().with_account("a@b.com", "secret"),
        );
        let mut session = session_at_checkout();

        h.coordinator
            .checkout(&mut session, &CredentialForm::login("a@b.com", "secret"))
            .await
            .unwrap();

        assert_eq!(session.phase(), CheckoutPhase::Succeeded);
        assert_eq!(h.store.document_count().await, 1);
        assert_eq!(
            h.notifications.last().unwrap().message,
            "Signed in successfully!"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_delays_are_respected() {
        let store = InMemoryDocumentStore::new();
        let coordinator = CheckoutCoordinator::new(
            store,
            InMemoryIdentityService::new(),
            InMemoryNotificationSink::new(),
            CheckoutConfig::default(),
        );
        let mut session = session_at_checkout();

        let started = tokio::time::Instant::now();
        coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(4500));
    }
}

mod persistence_failure {
    use super::*;

    #[tokio::test]
    async fn test_store_failure_reverts_phase_and_keeps_snapshot() {
        let h = TestHarness::new();
        h.store.set_fail_on_put(true).await;
        let mut session = session_at_checkout();
        let before = session.workflow().clone();

        let err = h
            .coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Persistence(_)));
        assert_eq!(session.phase(), CheckoutPhase::Collecting);
        assert_eq!(session.workflow(), &before);
        assert!(session.workflow().snapshot().reservation_id().is_none());
        assert_eq!(h.store.document_count().await, 0);

        // identity step is not rolled back
        assert!(h.identity.has_account("a@b.com"));
        assert_eq!(
            h.notifications.last().unwrap(),
            checkout::Notification {
                kind: NotificationKind::Error,
                message: "Payment failed. Please try again.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_retry_after_store_recovers() {
        let h = TestHarness::new();
        h.store.set_fail_on_put(true).await;
        let mut session = session_at_checkout();

        h.coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap_err();

        h.store.set_fail_on_put(false).await;
        let confirmation = h
            .coordinator
            .checkout(&mut session, &CredentialForm::login("a@b.com", "secret"))
            .await
            .unwrap();

        assert_eq!(session.phase(), CheckoutPhase::Succeeded);
        assert_eq!(
            session.workflow().snapshot().reservation_id(),
            Some(&confirmation.reservation_id)
        );
    }
}

mod identity_failure {
    use super::*;

    #[tokio::test]
    async fn test_bad_credentials_stay_in_phase_one() {
        let h = TestHarness::with_identity(
            InMemoryIdentityService::new().with_account("a@b.com", "secret"),
        );
        let mut session = session_at_checkout();

        let err = h
            .coordinator
            .checkout(&mut session, &CredentialForm::login("a@b.com", "wrong"))
            .await
            .unwrap_err();

        match err {
            CheckoutError::Identity(e) => assert_eq!(e.kind, IdentityErrorKind::InvalidCredentials),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.phase(), CheckoutPhase::Collecting);
        assert_eq!(session.workflow().current_step(), WorkflowStep::Checkout);
        assert_eq!(h.store.document_count().await, 0);
        assert_eq!(
            h.messages(),
            vec![(
                NotificationKind::Error,
                "Invalid email or password".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_duplicate_account_is_reported() {
        let h = TestHarness::with_identity(
            InMemoryIdentityService::new().with_account("a@b.com", "secret"),
        );
        let mut session = session_at_checkout();

        let err = h
            .coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), "identity");
        assert_eq!(session.phase(), CheckoutPhase::Collecting);
        assert_eq!(h.notifications.notifications().len(), 1);
    }
}

mod guards {
    use super::*;

    #[tokio::test]
    async fn test_invalid_form_does_not_contact_identity() {
        let h = TestHarness::new();
        let mut session = session_at_checkout();

        let err = h
            .coordinator
            .checkout(
                &mut session,
                &CredentialForm::register("a@b.com", "abc", "abc"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Credentials(_)));
        assert_eq!(h.identity.call_count(), 0);
        assert_eq!(
            h.notifications.last().unwrap().message,
            "Password must be at least 6 characters"
        );

        h.coordinator
            .checkout(
                &mut session,
                &CredentialForm::register("a@b.com", "secret", "other"),
            )
            .await
            .unwrap_err();
        assert_eq!(
            h.notifications.last().unwrap().message,
            "Please fill all required fields correctly"
        );
    }

    #[tokio::test]
    async fn test_empty_seats_are_rejected() {
        let h = TestHarness::new();
        let mut session = BookingSession::new();

        let err = h
            .coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::NoSeats));
        assert_eq!(h.identity.call_count(), 0);
        assert_eq!(
            h.notifications.last().unwrap().message,
            "Please select seats first"
        );
    }

    #[tokio::test]
    async fn test_completed_session_rejects_reentry() {
        let h = TestHarness::new();
        let mut session = session_at_checkout();

        h.coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap();

        let err = h
            .coordinator
            .checkout(&mut session, &CredentialForm::login("a@b.com", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::InProgress(CheckoutPhase::Succeeded)
        ));
        assert_eq!(h.identity.call_count(), 1);
        assert_eq!(h.store.document_count().await, 1);
        assert_eq!(
            h.notifications.last().unwrap().message,
            "Checkout is already in progress"
        );
    }

    #[tokio::test]
    async fn test_reset_allows_a_new_booking() {
        let h = TestHarness::new();
        let mut session = session_at_checkout();

        h.coordinator
            .checkout(&mut session, &register_form())
            .await
            .unwrap();
        session.reset();

        assert_eq!(session, BookingSession::new());
    }
}

mod shared_session {
    use super::*;

    fn coordinator_with_delays(
        store: InMemoryDocumentStore,
        notifications: InMemoryNotificationSink,
        processing_ms: u64,
        redirect_ms: u64,
    ) -> TestCoordinator {
        CheckoutCoordinator::new(
            store,
            InMemoryIdentityService::new(),
            notifications,
            CheckoutConfig::from_millis(processing_ms, redirect_ms),
        )
    }

    fn phase_of(session: &Mutex<BookingSession>) -> (CheckoutPhase, bool) {
        let session = session.lock().unwrap();
        (session.phase(), session.is_checkout_running())
    }

    #[tokio::test(start_paused = true)]
    async fn test_phases_are_visible_while_running() {
        let coordinator = coordinator_with_delays(
            InMemoryDocumentStore::new(),
            InMemoryNotificationSink::new(),
            300,
            300,
        );
        let session = Mutex::new(session_at_checkout());

        let observer = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let processing = phase_of(&session);
            tokio::time::sleep(Duration::from_millis(300)).await;
            let succeeded = phase_of(&session);
            (processing, succeeded)
        };

        let form = register_form();
        let (result, (processing, succeeded)) = tokio::join!(
            coordinator.checkout_shared(&session, &form),
            observer
        );

        result.unwrap();
        assert_eq!(processing, (CheckoutPhase::Processing, true));
        assert_eq!(succeeded, (CheckoutPhase::Succeeded, true));
        assert_eq!(phase_of(&session), (CheckoutPhase::Succeeded, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_checkout_returns_to_collecting() {
        let store = InMemoryDocumentStore::new();
        let coordinator =
            coordinator_with_delays(store.clone(), InMemoryNotificationSink::new(), 300, 0);
        let session = Mutex::new(session_at_checkout());

        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            coordinator.checkout_shared(&session, &register_form()),
        )
        .await;

        assert!(abandoned.is_err());
        assert_eq!(phase_of(&session), (CheckoutPhase::Collecting, false));
        assert_eq!(
            session.lock().unwrap().workflow().current_step(),
            WorkflowStep::Checkout
        );
        assert_eq!(store.document_count().await, 0);

        coordinator
            .checkout_shared(&session, &CredentialForm::login("a@b.com", "secret"))
            .await
            .unwrap();
        assert_eq!(phase_of(&session), (CheckoutPhase::Succeeded, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_a_running_checkout() {
        let store = InMemoryDocumentStore::new();
        let notifications = InMemoryNotificationSink::new();
        let coordinator = coordinator_with_delays(store.clone(), notifications.clone(), 300, 0);
        let session = Mutex::new(session_at_checkout());

        let reset = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            session.lock().unwrap().reset();
        };

        let form = register_form();
        let (result, ()) = tokio::join!(
            coordinator.checkout_shared(&session, &form),
            reset
        );

        assert!(matches!(result, Err(CheckoutError::Cancelled)));
        assert_eq!(*session.lock().unwrap(), BookingSession::new());
        assert_eq!(store.document_count().await, 0);
        assert_eq!(
            notifications.last().unwrap().message,
            "Checkout was cancelled"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_checkout_is_refused_while_running() {
        let notifications = InMemoryNotificationSink::new();
        let coordinator =
            coordinator_with_delays(InMemoryDocumentStore::new(), notifications.clone(), 300, 0);
        let session = Mutex::new(session_at_checkout());

        let second = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            coordinator
                .checkout_shared(&session, &CredentialForm::login("a@b.com", "secret"))
                .await
        };

        let form = register_form();
        let (first, second) = tokio::join!(
            coordinator.checkout_shared(&session, &form),
            second
        );

        first.unwrap();
        assert!(matches!(
            second,
            Err(CheckoutError::InProgress(CheckoutPhase::Processing))
        ));
        assert!(
            notifications
                .notifications()
                .iter()
                .any(|n| n.message == "Checkout is already in progress")
        );
    }
}
