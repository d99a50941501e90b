//! Session token issuance and validation.
//!
//! Session tokens are HS256 JWTs carrying the user ID as their only identity
//! claim. Nothing is stored server-side.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default session lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: u64 = 7;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID.
    pub id: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
}

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not a decodable JWT.
    Malformed,
    /// Signature does not match the server secret.
    BadSignature,
    /// Past its expiration time.
    Expired,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Malformed => write!(f, "malformed"),
            InvalidReason::BadSignature => write!(f, "bad signature"),
            InvalidReason::Expired => write!(f, "expired"),
        }
    }
}

/// A token failed validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid session token ({reason})")]
pub struct InvalidToken {
    pub reason: InvalidReason,
}

/// Token issuance failed (only possible on a serializer fault).
#[derive(Error, Debug)]
#[error("failed to issue session token: {0}")]
pub struct IssueError(String);

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl SessionTokenCodec {
    /// Create a codec from the signing secret with the default 7-day lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl_days(secret, DEFAULT_TOKEN_TTL_DAYS)
    }

    /// Create a codec with a custom lifetime.
    pub fn with_ttl_days(secret: &str, ttl_days: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: ttl_days.saturating_mul(SECONDS_PER_DAY),
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for a user, valid from now.
    pub fn issue(&self, user_id: &str) -> Result<String, IssueError> {
        self.issue_at(user_id, chrono::Utc::now().timestamp().max(0) as u64)
    }

    /// Issue a token as if it were issued at `issued_at` (unix seconds).
    pub fn issue_at(&self, user_id: &str, issued_at: u64) -> Result<String, IssueError> {
        let claims = SessionClaims {
            id: user_id.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IssueError(e.to_string()))
    }

    /// Validate a token and return the user ID it carries.
    pub fn validate(&self, token: &str) -> Result<String, InvalidToken> {
        self.decode_claims(token).map(|claims| claims.id)
    }

    /// Validate a token and return all of its claims.
    pub fn decode_claims(&self, token: &str) -> Result<SessionClaims, InvalidToken> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => InvalidReason::Expired,
                    ErrorKind::InvalidSignature => InvalidReason::BadSignature,
                    _ => InvalidReason::Malformed,
                };
                InvalidToken { reason }
            })
    }
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
