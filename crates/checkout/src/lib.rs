//! Checkout saga for seat bookings.
//!
//! Checkout runs two steps in order:
//! 1. Create or authenticate the user with the identity service
//! 2. Persist the booking under a fresh reservation id
//!
//! There is no compensation. If persistence fails after the identity step
//! succeeded, the account stays behind without a booking; the coordinator
//! counts these in `checkout_orphaned_identities_total`.

pub mod config;
pub mod coordinator;
pub mod credentials;
pub mod error;
pub mod phase;
pub mod record;
pub mod services;
pub mod session;

pub use config::CheckoutConfig;
pub use coordinator::CheckoutCoordinator;
pub use credentials::{AuthMode, CredentialError, CredentialForm, MIN_PASSWORD_LEN};
pub use error::{CheckoutError, Result};
pub use phase::CheckoutPhase;
pub use record::snapshot_record;
pub use services::{
    IdentityError, IdentityErrorKind, IdentityService, InMemoryIdentityService,
    InMemoryNotificationSink, Notification, NotificationKind, NotificationSink,
    TracingNotificationSink,
};
pub use session::BookingSession;
