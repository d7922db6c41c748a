use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::HashingCost;
use chrono::Duration;
use credential_service::config::MailConfig;
use credential_service::credential::models::Credential;
use credential_service::credential::ports::CredentialRepository;
use credential_service::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::notifications::SmtpNotifier;
use credential_service::repositories::InMemoryCredentialRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: InMemoryCredentialRepository,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(InMemoryCredentialRepository::new()).await
    }

    /// Spawn the application over a pre-populated repository
    pub async fn spawn_with(repository: InMemoryCredentialRepository) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(test_authenticator());

        let notifier = Arc::new(
            SmtpNotifier::new(&MailConfig {
                enabled: false,
                host: "smtp.example.com".to_string(),
                port: 465,
                username: String::new(),
                password: String::new(),
                sender: "no-reply@example.com".to_string(),
            })
            .expect("Failed to create notifier"),
        );

        let credential_service = Arc::new(CredentialService::new(
            Arc::new(repository.clone()),
            notifier,
            Arc::clone(&authenticator),
        ));

        let router = create_router(credential_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request with a form body
    pub fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::RequestBuilder {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .form(fields)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Insert a credential directly into the store
    pub async fn insert(&self, credential: Credential) {
        self.repository
            .create(credential)
            .await
            .expect("Failed to insert credential");
    }

    /// Fetch the single stored credential for an email
    pub async fn stored_credential(&self, email: &str) -> Credential {
        self.repository
            .find_by_email(email)
            .await
            .expect("Failed to query store")
            .into_iter()
            .next()
            .expect("Credential not stored")
    }

    /// Build a credential with a hashed password, bypassing registration
    pub fn credential(&self, email: &str, password: &str) -> Credential {
        Credential::new(
            email.to_string(),
            self.authenticator
                .hash_password(password)
                .expect("Failed to hash password"),
        )
    }
}

pub fn test_authenticator() -> Authenticator {
    Authenticator::new(&AuthSettings {
        secret: TEST_SECRET.to_vec(),
        token_ttl: Duration::hours(24),
        hashing: HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    })
    .expect("Failed to build authenticator")
}
