//! In-memory credential repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::ports::CredentialRepository;

/// In-memory implementation of CredentialRepository.
///
/// Email uniqueness is checked under the write lock, so concurrent creates
/// for one email cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<Vec<Credential>>>,
}

impl InMemoryCredentialRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial credentials.
    ///
    /// Uniqueness is not checked, which lets tests reproduce a store whose
    /// email invariant was already broken.
    pub fn with_credentials(credentials: Vec<Credential>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(credentials)),
        }
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Vec<Credential>, CredentialError> {
        let credentials = self.credentials.read().await;
        Ok(credentials
            .iter()
            .filter(|credential| credential.email == email)
            .cloned()
            .collect())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        let mut credentials = self.credentials.write().await;

        if credentials
            .iter()
            .any(|existing| existing.email == credential.email)
        {
            return Err(CredentialError::DuplicateEmail);
        }

        credentials.push(credential.clone());
        Ok(credential)
    }

    async fn delete(&self, credential: &Credential) -> Result<(), CredentialError> {
        let mut credentials = self.credentials.write().await;
        let before = credentials.len();
        credentials.retain(|existing| existing.id != credential.id);

        if credentials.len() == before {
            return Err(CredentialError::Store(format!(
                "credential {} not found",
                credential.id
            )));
        }
        Ok(())
    }
}
