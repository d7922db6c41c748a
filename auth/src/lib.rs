//! Authentication utilities library
//!
//! Provides the cryptographic building blocks behind registration and login:
//! - Password hashing (Argon2id, salted, configurable cost)
//! - Bearer token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashingCost::default()).unwrap();
//! let hash = hasher.hash("myPassword123").unwrap();
//! assert!(hasher.verify("myPassword123", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenVerification};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let token = issuer.issue("user123", "alice@example.com").unwrap();
//! assert!(matches!(
//!     issuer.verify(token.as_str(), "user123"),
//!     TokenVerification::Valid(_)
//! ));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthSettings;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AuthToken;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerification;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
