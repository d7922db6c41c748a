use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims signed into every bearer token.
///
/// The signature covers all four fields, so neither the subject nor the
/// validity window can be altered without invalidating the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (credential identifier)
    pub sub: String,

    /// Email the credential was registered with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A signed, time-bound bearer token.
///
/// Owned by the caller once issued; nothing server-side tracks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub subject: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    token: String,
}

impl AuthToken {
    pub(crate) fn new(
        claims: &TokenClaims,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token: String,
    ) -> Self {
        Self {
            subject: claims.sub.clone(),
            email: claims.email.clone(),
            issued_at,
            expires_at,
            token,
        }
    }

    /// Compact encoded token, as handed to clients.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }
}
