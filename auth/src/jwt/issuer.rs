use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AuthToken;
use super::claims::TokenClaims;
use super::errors::TokenError;

/// Outcome of checking a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    /// Signature verified, not expired, subject matches
    Valid(TokenClaims),
    /// Signature verified but `exp` has passed
    Expired,
    /// Not a decodable token
    Malformed,
    /// Signature does not cover the presented claims or the expected subject
    SignatureMismatch,
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenVerification::Valid(_))
    }
}

/// Mints and verifies HS256 bearer tokens.
///
/// The signing secret is read-only after construction and shared by every
/// request. Expiry is checked with zero leeway, after the signature.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `subject`, stamped with the current wall clock.
    pub fn issue(&self, subject: &str, email: &str) -> Result<AuthToken, TokenError> {
        self.issue_at(subject, email, Utc::now())
    }

    /// Issue a token for `subject` as if minted at `now`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - TTL is not positive or expiry overflows
    /// * `EncodingFailed` - Signing failed
    pub fn issue_at(
        &self,
        subject: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthToken, TokenError> {
        if self.ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }

        let issued_at = DateTime::from_timestamp(now.timestamp(), 0)
            .ok_or(TokenError::InvalidLifetime)?;
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::InvalidLifetime)?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(AuthToken::new(&claims, issued_at, expires_at, token))
    }

    /// Verify a token and return its claims without binding it to a subject.
    ///
    /// Used where the subject is learned from the token itself.
    pub fn inspect(&self, token: &str) -> TokenVerification {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenVerification::Valid(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => TokenVerification::Expired,
                ErrorKind::InvalidSignature => TokenVerification::SignatureMismatch,
                _ => TokenVerification::Malformed,
            },
        }
    }

    /// Verify a token against the identity it is expected to carry.
    ///
    /// A correctly signed token for a different subject is a
    /// `SignatureMismatch`: its signature does not cover `expected_subject`.
    pub fn verify(&self, token: &str, expected_subject: &str) -> TokenVerification {
        match self.inspect(token) {
            TokenVerification::Valid(claims) if claims.sub != expected_subject => {
                TokenVerification::SignatureMismatch
            }
            outcome => outcome,
        }
    }
}
