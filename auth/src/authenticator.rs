use chrono::Duration;

use crate::jwt::AuthToken;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerification;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Immutable settings the authenticator is built from.
///
/// Constructed once at process start.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret: Vec<u8>,
    pub token_ttl: Duration,
    pub hashing: HashingCost,
}

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    // Verified against when no credential exists, so unknown emails cost
    // the same Argon2 work as wrong passwords.
    dummy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Signing secret, token lifetime and hashing cost
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `PasswordError` - Hashing cost is invalid
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new(settings.hashing)?;
        let dummy_hash = password_hasher.hash("dummyPassword0")?;

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(&settings.secret, settings.token_ttl),
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// With no stored hash the password is checked against an internal dummy
    /// hash and the result is always `false`.
    pub fn verify_password(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                let _ = self.password_hasher.verify(password, &self.dummy_hash);
                false
            }
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is bound to
    /// * `email` - Email carried in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        email: &str,
    ) -> Result<AuthToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject, email)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the password was just hashed.
    pub fn issue_token(&self, subject: &str, email: &str) -> Result<AuthToken, TokenError> {
        self.token_issuer.issue(subject, email)
    }

    /// Verify a token against the identity it should carry.
    pub fn verify_token(&self, token: &str, expected_subject: &str) -> TokenVerification {
        self.token_issuer.verify(token, expected_subject)
    }

    /// Verify a token and return its claims.
    pub fn inspect_token(&self, token: &str) -> TokenVerification {
        self.token_issuer.inspect(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(&AuthSettings {
            secret: b"test_secret_key_at_least_32_bytes!".to_vec(),
            token_ttl: Duration::minutes(30),
            hashing: HashingCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        })
        .expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("validPassword123")
            .expect("Failed to hash password");

        let token = authenticator
            .authenticate("validPassword123", &hash, "user123", "user@example.com")
            .expect("Authentication failed");

        assert!(authenticator
            .verify_token(token.as_str(), "user123")
            .is_valid());
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("validPassword123").unwrap();

        let result =
            authenticator.authenticate("wrongPassword", &hash, "user123", "user@example.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate(
            "validPassword123",
            "not-a-phc-string",
            "user123",
            "user@example.com",
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_without_stored_hash() {
        let authenticator = authenticator();

        assert!(!authenticator.verify_password("dummyPassword0", None));
        assert!(!authenticator.verify_password("anything", None));
    }

    #[test]
    fn test_issue_and_inspect_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_token("user123", "user@example.com")
            .unwrap();

        match authenticator.inspect_token(token.as_str()) {
            TokenVerification::Valid(claims) => assert_eq!(claims.sub, "user123"),
            other => panic!("expected valid token, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_hashing_cost() {
        let result = Authenticator::new(&AuthSettings {
            secret: b"test_secret_key_at_least_32_bytes!".to_vec(),
            token_ttl: Duration::minutes(30),
            hashing: HashingCost {
                memory_kib: 0,
                iterations: 0,
                parallelism: 0,
            },
        });

        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }
}
