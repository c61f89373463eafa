//! Shared application state and per-session booking state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use checkout::{
    BookingSession, CheckoutConfig, CheckoutCoordinator, InMemoryIdentityService,
    InMemoryNotificationSink,
};
use domain::{Catalog, SeatMap};
use store::DocumentStore;
use ticket::PseudoQrRenderer;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

/// One user's booking session.
#[derive(Debug, Default)]
pub struct Session {
    pub booking: BookingSession,
    /// Seat grid of the chosen screening. None until a showtime is set.
    pub seat_map: Option<SeatMap>,
    pub notifications: InMemoryNotificationSink,
}

impl Session {
    /// Starts over with an empty booking.
    pub fn reset(&mut self) {
        self.booking.reset();
        self.seat_map = None;
    }
}

impl AsMut<BookingSession> for Session {
    fn as_mut(&mut self) -> &mut BookingSession {
        &mut self.booking
    }
}

/// A session shared between handlers and a running checkout.
///
/// Lock only for short synchronous sections, never across an await.
pub type SharedSession = Arc<Mutex<Session>>;

/// Locks a shared session.
pub fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Live sessions by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Entry {
            session: SharedSession::default(),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        metrics::gauge!("booking_sessions_active").increment(1.0);
        id
    }

    /// Looks up a session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Closes a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            metrics::gauge!("booking_sessions_active").decrement(1.0);
        }
        removed
    }

    /// Closes every session unused for longer than `max_idle`.
    ///
    /// Sessions with a running checkout are kept. Returns how many were closed.
    pub async fn expire_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_seen) <= max_idle
                || lock_session(&entry.session).booking.is_checkout_running()
        });

        let expired = before - sessions.len();
        if expired > 0 {
            metrics::gauge!("booking_sessions_active").decrement(expired as f64);
            tracing::info!(expired, remaining = sessions.len(), "idle sessions closed");
        }
        expired
    }

    /// Returns the number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no session is open.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Shared application state accessible from all handlers.
pub struct AppState<S: DocumentStore> {
    pub sessions: SessionRegistry,
    pub store: S,
    pub identity: InMemoryIdentityService,
    pub catalog: Catalog,
    pub renderer: PseudoQrRenderer,
    pub checkout_config: CheckoutConfig,
}

impl<S: DocumentStore + Clone> AppState<S> {
    /// Builds a checkout coordinator reporting to `notifications`.
    pub fn coordinator(
        &self,
        notifications: InMemoryNotificationSink,
    ) -> CheckoutCoordinator<S, InMemoryIdentityService, InMemoryNotificationSink> {
        CheckoutCoordinator::new(
            self.store.clone(),
            self.identity.clone(),
            notifications,
            self.checkout_config,
        )
    }
}
