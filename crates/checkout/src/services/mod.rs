//! External service traits and in-memory implementations for checkout steps.

pub mod identity;
pub mod notification;

pub use identity::{IdentityError, IdentityErrorKind, IdentityService, InMemoryIdentityService};
pub use notification::{
    InMemoryNotificationSink, Notification, NotificationKind, NotificationSink,
    TracingNotificationSink,
};
