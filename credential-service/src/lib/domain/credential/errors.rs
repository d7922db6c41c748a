use auth::AuthenticationError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::credential::validation::ValidationFailure;

/// Error for CredentialId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for notification delivery
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    BuildFailed(String),

    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// Top-level error for registration and authentication.
///
/// The `Display` text of `DuplicateEmail` and `AuthFailure` is what callers
/// see. Store, hashing and token errors carry internal detail for logs only.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Email already in use, please use another one")]
    DuplicateEmail,

    #[error("Incorrect email or password")]
    AuthFailure,

    /// More than one credential shares an email.
    #[error("Found {0} credentials registered with the same email")]
    InternalAnomaly(usize),

    #[error("Credential store error: {0}")]
    Store(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl From<AuthenticationError> for CredentialError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => CredentialError::AuthFailure,
            AuthenticationError::PasswordError(e) => CredentialError::Password(e),
            AuthenticationError::TokenError(e) => CredentialError::Token(e),
        }
    }
}

impl From<sqlx::Error> for CredentialError {
    fn from(err: sqlx::Error) -> Self {
        CredentialError::Store(err.to_string())
    }
}
