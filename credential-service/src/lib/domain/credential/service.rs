use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthToken;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::credential::errors::CredentialError;
use crate::credential::models::AuthenticationOutcome;
use crate::credential::models::Credential;
use crate::credential::models::RegistrationOutcome;
use crate::credential::models::SubmittedCredentials;
use crate::credential::ports::CredentialRepository;
use crate::credential::ports::CredentialServicePort;
use crate::credential::ports::Notifier;
use crate::credential::validation::validate_login_shape;
use crate::credential::validation::validate_registration;

const WELCOME_SUBJECT: &str = "Welcome";
const WELCOME_BODY: &str =
    "Your account has been created. You can now sign in with this email address.";

/// Domain service implementation for registration and authentication.
///
/// Holds no mutable state of its own; the authenticator is shared read-only.
pub struct CredentialService<CR, N>
where
    CR: CredentialRepository,
    N: Notifier,
{
    repository: Arc<CR>,
    notifier: Arc<N>,
    authenticator: Arc<Authenticator>,
}

impl<CR, N> CredentialService<CR, N>
where
    CR: CredentialRepository,
    N: Notifier,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `notifier` - Outbound email implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<CR>, notifier: Arc<N>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            notifier,
            authenticator,
        }
    }

    /// Mint a token for a freshly stored credential.
    ///
    /// On failure the credential is deleted again so no tokenless account is
    /// left behind.
    async fn issue_for_new_credential(
        &self,
        credential: &Credential,
    ) -> Result<AuthToken, CredentialError> {
        match self
            .authenticator
            .issue_token(&credential.id.to_string(), &credential.email)
        {
            Ok(token) => Ok(token),
            Err(e) => {
                tracing::error!(
                    credential_id = %credential.id,
                    error = %e,
                    "Token issuance failed after registration, removing credential"
                );
                if let Err(delete_err) = self.repository.delete(credential).await {
                    tracing::error!(
                        credential_id = %credential.id,
                        error = %delete_err,
                        "Failed to remove credential after token issuance failure"
                    );
                }
                Err(e.into())
            }
        }
    }

    async fn send_welcome(&self, credential: &Credential) {
        let recipients = [credential.email.clone()];
        if let Err(e) = self
            .notifier
            .send(&recipients, WELCOME_SUBJECT, WELCOME_BODY)
            .await
        {
            tracing::error!(
                credential_id = %credential.id,
                error = %e,
                "Failed to send registration email"
            );
        }
    }
}

#[async_trait]
impl<CR, N> CredentialServicePort for CredentialService<CR, N>
where
    CR: CredentialRepository,
    N: Notifier,
{
    async fn register(
        &self,
        submitted: SubmittedCredentials,
    ) -> Result<RegistrationOutcome, CredentialError> {
        validate_registration(submitted.email.as_deref(), submitted.password.as_deref())
            .into_result()?;
        let (email, password) = submitted.into_parts()?;

        if !self.repository.find_by_email(&email).await?.is_empty() {
            tracing::debug!("Registration rejected: email already in use");
            return Err(CredentialError::DuplicateEmail);
        }

        let password_hash = self.authenticator.hash_password(&password)?;
        let credential = self
            .repository
            .create(Credential::new(email, password_hash))
            .await?;

        let token = self.issue_for_new_credential(&credential).await?;
        tracing::info!(credential_id = %credential.id, "Credential registered");

        self.send_welcome(&credential).await;

        Ok(RegistrationOutcome { credential, token })
    }

    async fn authenticate(
        &self,
        submitted: SubmittedCredentials,
    ) -> Result<AuthenticationOutcome, CredentialError> {
        validate_login_shape(submitted.email.as_deref(), submitted.password.as_deref())
            .into_result()?;
        let (email, password) = submitted.into_parts()?;

        let mut found = self.repository.find_by_email(&email).await?;

        match found.len() {
            0 => {
                self.authenticator.verify_password(&password, None);
                tracing::debug!("Authentication rejected: unknown email");
                Err(CredentialError::AuthFailure)
            }
            1 => {
                let credential = found.remove(0);
                let token = self
                    .authenticator
                    .authenticate(
                        &password,
                        &credential.password_hash,
                        &credential.id.to_string(),
                        &credential.email,
                    )
                    .map_err(|e| {
                        if matches!(e, AuthenticationError::InvalidCredentials) {
                            tracing::debug!(
                                credential_id = %credential.id,
                                "Authentication rejected: wrong password"
                            );
                        }
                        CredentialError::from(e)
                    })?;

                tracing::info!(credential_id = %credential.id, "Credential authenticated");
                Ok(AuthenticationOutcome {
                    email: credential.email,
                    token,
                })
            }
            count => {
                self.authenticator.verify_password(&password, None);
                tracing::error!(
                    count,
                    "Several credentials registered with the same email"
                );
                Err(CredentialError::InternalAnomaly(count))
            }
        }
    }
}
