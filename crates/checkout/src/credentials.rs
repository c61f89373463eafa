//! Credential form submitted at checkout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Whether checkout creates an account or signs in to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Register,
    Login,
}

impl AuthMode {
    /// Returns the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Register => "register",
            AuthMode::Login => "login",
        }
    }

    /// Message shown once the identity step succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            AuthMode::Register => "Account created successfully!",
            AuthMode::Login => "Signed in successfully!",
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Problems with the submitted credential form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Email or password missing, or the confirmation does not match.
    #[error("Credential form is incomplete")]
    Incomplete,

    /// New account password is too short.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl CredentialError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CredentialError::Incomplete => "Please fill all required fields correctly".to_string(),
            CredentialError::PasswordTooShort { .. } => self.to_string(),
        }
    }
}

/// Email and password, plus the confirmation when registering.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CredentialForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub mode: AuthMode,
}

impl CredentialForm {
    /// Creates a registration form.
    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            mode: AuthMode::Register,
        }
    }

    /// Creates a sign-in form.
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: String::new(),
            mode: AuthMode::Login,
        }
    }

    /// Checks the form before any service is contacted.
    pub fn validate(&self) -> Result<(), CredentialError> {
        let mismatch = self.mode == AuthMode::Register && self.password != self.confirm_password;
        if self.email.trim().is_empty() || self.password.is_empty() || mismatch {
            return Err(CredentialError::Incomplete);
        }

        if self.mode == AuthMode::Register && self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for CredentialForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_forms() {
        assert!(CredentialForm::register("a@b.com", "secret", "secret").validate().is_ok());
        assert!(CredentialForm::login("a@b.com", "x").validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let err = CredentialForm::login("", "secret").validate().unwrap_err();
        assert_eq!(err, CredentialError::Incomplete);
        assert_eq!(err.user_message(), "Please fill all required fields correctly");

        assert_eq!(
            CredentialForm::login("a@b.com", "").validate(),
            Err(CredentialError::Incomplete)
        );
    }

    #[test]
    fn test_confirmation_must_match_when_registering() {
        assert_eq!(
            CredentialForm::register("a@b.com", "secret", "secreT").validate(),
            Err(CredentialError::Incomplete)
        );
    }

    #[test]
    fn test_short_password_when_registering() {
        let err = CredentialForm::register("a@b.com", "abc", "abc")
            .validate()
            .unwrap_err();
        assert_eq!(err.user_message(), "Password must be at least 6 characters");

        // sign-in does not check length
        assert!(CredentialForm::login("a@b.com", "abc").validate().is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let form = CredentialForm::login("a@b.com", "hunter22");
        assert!(!format!("{form:?}").contains("hunter22"));
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let form: CredentialForm =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw","mode":"login"}"#).unwrap();
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.confirm_password, "");
    }
}
