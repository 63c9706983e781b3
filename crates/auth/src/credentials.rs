//! Password hashing and signed-token issue/verify.

use bazaar_core::ResourceId;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated identity's id.
    pub sub: ResourceId,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

/// Failure inside the credential service itself, as opposed to a verdict
/// about the caller's input.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("hashing task did not complete")]
    Cancelled,

    #[error("token signing failed: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Hashes passwords and issues/verifies signed access tokens.
///
/// Built once at startup from the signing secret and bcrypt work factor,
/// then shared behind an `Arc`. The secret never changes at runtime.
pub struct Credentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    cost: u32,
}

impl Credentials {
    /// Service with an explicit bcrypt work factor.
    pub fn new(secret: &[u8], cost: u32) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Default leeway is 60s; expiry here is strict.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            cost,
        }
    }

    /// Hash `password` with a fresh salt.
    ///
    /// bcrypt is CPU-bound by design, so the work runs on the blocking
    /// pool rather than an async executor thread.
    pub async fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|_| CredentialError::Cancelled)?
            .map_err(CredentialError::from)
    }

    /// Check `password` against a stored hash.
    pub async fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, CredentialError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|_| CredentialError::Cancelled)?
            .map_err(CredentialError::from)
    }

    /// Issue a token for `subject`, valid for `ttl` from now.
    pub fn issue_token(
        &self,
        subject: ResourceId,
        ttl: Duration,
    ) -> Result<String, CredentialError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(CredentialError::from)
    }

    /// Verify `token` and return its subject.
    ///
    /// Verification fails as soon as the current time passes `exp`. Every
    /// rejection maps onto one of the three [`TokenError`] kinds; callers
    /// decide how much of that detail to surface.
    pub fn verify_token(&self, token: &str) -> Result<ResourceId, TokenError> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(err) => Err(match err.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }),
        }
    }
}
