use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::errors::NotificationError;
use crate::credential::models::AuthenticationOutcome;
use crate::credential::models::Credential;
use crate::credential::models::RegistrationOutcome;
use crate::credential::models::SubmittedCredentials;

/// Port for the register/authenticate decision path.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `submitted` - Email/password pair as received
    ///
    /// # Returns
    /// Stored credential and a token bound to it
    ///
    /// # Errors
    /// * `Validation` - Missing field or policy violation
    /// * `DuplicateEmail` - Email is already registered
    /// * `Store` - Credential store failed
    /// * `Password` / `Token` - Hashing or token issuance failed
    async fn register(
        &self,
        submitted: SubmittedCredentials,
    ) -> Result<RegistrationOutcome, CredentialError>;

    /// Authenticate an email/password pair and issue a token.
    ///
    /// # Arguments
    /// * `submitted` - Email/password pair as received
    ///
    /// # Returns
    /// Registered email and a fresh token
    ///
    /// # Errors
    /// * `Validation` - Missing field
    /// * `AuthFailure` - Unknown email or wrong password
    /// * `InternalAnomaly` - Several credentials share the email
    /// * `Store` - Credential store failed
    async fn authenticate(
        &self,
        submitted: SubmittedCredentials,
    ) -> Result<AuthenticationOutcome, CredentialError>;
}

/// Persistence operations for credentials.
///
/// Implementations should enforce email uniqueness themselves; the service's
/// lookup-then-create is not atomic.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve every credential registered with `email`.
    ///
    /// # Returns
    /// Zero, one, or (if uniqueness was violated) several credentials
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Vec<Credential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Store` - Storage operation failed
    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError>;

    /// Remove a credential.
    ///
    /// # Errors
    /// * `Store` - Credential does not exist or storage operation failed
    async fn delete(&self, credential: &Credential) -> Result<(), CredentialError>;
}

/// Outbound email delivery.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send a plain-text email.
    ///
    /// # Errors
    /// * `InvalidAddress` - A recipient could not be parsed
    /// * `BuildFailed` - Message could not be assembled
    /// * `SendFailed` - Transport rejected the message
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}
