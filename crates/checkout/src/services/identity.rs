//! Identity service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::Principal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::{AuthMode, MIN_PASSWORD_LEN};

/// Why the identity service refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityErrorKind {
    /// Unknown account or wrong password.
    InvalidCredentials,
    /// Registration for an email that already has an account.
    EmailAlreadyInUse,
    /// Password rejected by the service.
    WeakPassword,
    /// Malformed email address.
    InvalidEmail,
    /// The service could not be reached.
    Unavailable,
}

impl IdentityErrorKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityErrorKind::InvalidCredentials => "invalid_credentials",
            IdentityErrorKind::EmailAlreadyInUse => "email_already_in_use",
            IdentityErrorKind::WeakPassword => "weak_password",
            IdentityErrorKind::InvalidEmail => "invalid_email",
            IdentityErrorKind::Unavailable => "unavailable",
        }
    }
}

/// An identity service failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct IdentityError {
    pub kind: IdentityErrorKind,
    pub message: String,
}

impl IdentityError {
    /// Creates an error of `kind`.
    pub fn new(kind: IdentityErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Message shown to the user.
    ///
    /// Bad credentials get a fixed message; other kinds pass the service's
    /// message through.
    pub fn user_message(&self) -> String {
        match self.kind {
            IdentityErrorKind::InvalidCredentials => "Invalid email or password".to_string(),
            _ => self.message.clone(),
        }
    }
}

/// Trait for account creation and sign-in.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates an account (`Register`) or signs in (`Login`).
    async fn create_or_authenticate(
        &self,
        email: &str,
        password: &str,
        mode: AuthMode,
    ) -> Result<Principal, IdentityError>;
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    // Passwords are held as given; this is a test double.
    accounts: HashMap<String, String>,
    fail_with: Option<IdentityErrorKind>,
    calls: usize,
}

/// In-memory identity service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityService {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

impl InMemoryIdentityService {
    /// Creates a new in-memory identity service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an existing account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Configures every subsequent call to fail with `kind`.
    pub fn set_fail_with(&self, kind: Option<IdentityErrorKind>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_with = kind;
    }

    /// Returns the number of accounts.
    pub fn account_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .accounts
            .len()
    }

    /// Returns true if an account exists for `email`.
    pub fn has_account(&self, email: &str) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .accounts
            .contains_key(email)
    }

    /// Returns how many requests the service has received.
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn create_or_authenticate(
        &self,
        email: &str,
        password: &str,
        mode: AuthMode,
    ) -> Result<Principal, IdentityError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.calls += 1;

        if let Some(kind) = state.fail_with {
            return Err(IdentityError::new(kind, "Identity service unavailable"));
        }

        match mode {
            AuthMode::Register => {
                if !email.contains('@') {
                    return Err(IdentityError::new(
                        IdentityErrorKind::InvalidEmail,
                        "The email address is badly formatted.",
                    ));
                }
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(IdentityError::new(
                        IdentityErrorKind::WeakPassword,
                        "Password should be at least 6 characters",
                    ));
                }
                if state.accounts.contains_key(email) {
                    return Err(IdentityError::new(
                        IdentityErrorKind::EmailAlreadyInUse,
                        "The email address is already in use by another account.",
                    ));
                }
                state
                    .accounts
                    .insert(email.to_string(), password.to_string());
            }
            AuthMode::Login => {
                if state.accounts.get(email).map(String::as_str) != Some(password) {
                    return Err(IdentityError::new(
                        IdentityErrorKind::InvalidCredentials,
                        "Wrong email or password",
                    ));
                }
            }
        }

        Ok(Principal::new(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login() {
        let service = InMemoryIdentityService::new();

        let principal = service
            .create_or_authenticate("a@b.com", "secret", AuthMode::Register)
            .await
            .unwrap();
        assert_eq!(principal.email(), "a@b.com");
        assert!(service.has_account("a@b.com"));

        let principal = service
            .create_or_authenticate("a@b.com", "secret", AuthMode::Login)
            .await
            .unwrap();
        assert_eq!(principal.email(), "a@b.com");
        assert_eq!(service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let service = InMemoryIdentityService::new().with_account("a@b.com", "secret");

        let err = service
            .create_or_authenticate("a@b.com", "secret", AuthMode::Register)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::EmailAlreadyInUse);
        assert_eq!(service.account_count(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let service = InMemoryIdentityService::new().with_account("a@b.com", "secret");

        let err = service
            .create_or_authenticate("a@b.com", "nope", AuthMode::Login)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = service
            .create_or_authenticate("x@b.com", "secret", AuthMode::Login)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_invalid_registration_input() {
        let service = InMemoryIdentityService::new();

        let err = service
            .create_or_authenticate("not-an-email", "secret", AuthMode::Register)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::InvalidEmail);
        assert_eq!(err.user_message(), "The email address is badly formatted.");

        let err = service
            .create_or_authenticate("a@b.com", "abc", AuthMode::Register)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::WeakPassword);
    }

    #[tokio::test]
    async fn test_fail_with() {
        let service = InMemoryIdentityService::new();
        service.set_fail_with(Some(IdentityErrorKind::Unavailable));

        let err = service
            .create_or_authenticate("a@b.com", "secret", AuthMode::Register)
            .await
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::Unavailable);
        assert_eq!(service.account_count(), 0);
    }
}
