//! Notification sink trait and implementations.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Receives user-facing messages. Fire-and-forget.
pub trait NotificationSink: Send + Sync {
    /// Delivers one message.
    fn notify(&self, kind: NotificationKind, message: &str);

    /// Delivers an error message.
    fn error(&self, message: &str) {
        self.notify(NotificationKind::Error, message);
    }

    /// Delivers a success message.
    fn success(&self, message: &str) {
        self.notify(NotificationKind::Success, message);
    }
}

/// Keeps every message in memory, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationSink {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent message.
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Removes and returns every message.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .notifications
                .write()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                kind,
                message: message.to_string(),
            });
    }
}

/// Writes messages to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::warn!(notice = message, "user notified of error"),
            NotificationKind::Success => tracing::info!(notice = message, "user notified of success"),
        }
    }
}
