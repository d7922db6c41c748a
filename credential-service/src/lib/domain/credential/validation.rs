//! Email/password validation.
//!
//! Checks run in a fixed order and the first failure is the one reported:
//! presence, email length, email pattern, password length, password
//! character set. Login only checks presence, so a password accepted under
//! an older policy keeps working.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// Loose email shape: `local@domain.tld`, matched from the start of the input.
/// Not an RFC 5322 validator.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[\w.]+@\w+\.\w+").expect("email pattern is valid"));

/// Reason an email/password pair was rejected before any storage or hashing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Malformed request; expecting email and password")]
    MalformedRequest,

    #[error("Email can't be over {} characters.", MAX_EMAIL_LENGTH)]
    EmailTooLong,

    #[error("Email not valid.")]
    EmailNotValid,

    #[error(
        "Password must be between {}-{} characters.",
        MIN_PASSWORD_LENGTH,
        MAX_PASSWORD_LENGTH
    )]
    PasswordLength,

    #[error("Only alphanumeric characters are allowed in a password.")]
    PasswordNotAlphanumeric,
}

/// Outcome of validating an email/password pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(failure) => Err(failure),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationResult {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => ValidationResult::Valid,
            Err(failure) => ValidationResult::Invalid(failure),
        }
    }
}

/// Validate a registration request against the full policy.
pub fn validate_registration(email: Option<&str>, password: Option<&str>) -> ValidationResult {
    check_registration(email, password).into()
}

/// Validate a login request. Only presence is checked.
pub fn validate_login_shape(email: Option<&str>, password: Option<&str>) -> ValidationResult {
    require_present(email, password).map(|_| ()).into()
}

fn check_registration(
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), ValidationFailure> {
    let (email, password) = require_present(email, password)?;
    check_email(email)?;
    check_password(password)
}

fn require_present<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ValidationFailure> {
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ValidationFailure::MalformedRequest),
    }
}

fn check_email(email: &str) -> Result<(), ValidationFailure> {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationFailure::EmailTooLong);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationFailure::EmailNotValid);
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationFailure> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(ValidationFailure::PasswordLength);
    }
    if !password.chars().all(char::is_alphanumeric) {
        return Err(ValidationFailure::PasswordNotAlphanumeric);
    }
    Ok(())
}
