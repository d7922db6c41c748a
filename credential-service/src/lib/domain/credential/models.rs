use std::fmt;

use auth::AuthToken;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::credential::errors::CredentialIdError;
use crate::credential::validation::ValidationFailure;

/// Stored credential for a registered account.
///
/// Holds only the Argon2 hash of the password, never the plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Build a new credential with a fresh identifier.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password_hash` - PHC string produced by the password hasher
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: CredentialId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a credential ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CredentialIdError> {
        Uuid::parse_str(s)
            .map(CredentialId)
            .map_err(|e| CredentialIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email/password pair as submitted by a client.
///
/// Either field may be absent; absence is reported as a malformed request.
#[derive(Clone, Default)]
pub struct SubmittedCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl SubmittedCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Split into email and password.
    ///
    /// # Errors
    /// * `MalformedRequest` - Either field is absent
    pub fn into_parts(self) -> Result<(String, String), ValidationFailure> {
        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ValidationFailure::MalformedRequest),
        }
    }
}

impl fmt::Debug for SubmittedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmittedCredentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub credential: Credential,
    pub token: AuthToken,
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationOutcome {
    pub email: String,
    pub token: AuthToken,
}
