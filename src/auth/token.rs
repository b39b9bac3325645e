use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::Config;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// `id` is required: a token that decodes without it is rejected like any other invalid token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// The authenticated user's id.
    pub id: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    /// No signing secret is configured.
    MissingSecret,
    /// Bad signature, malformed token, expired token or missing subject.
    InvalidToken(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::MissingSecret => write!(f, "token secret is not configured"),
            TokenError::InvalidToken(reason) => write!(f, "invalid token: {}", reason),
        }
    }
}

impl std::error::Error for TokenError {}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs and verifies HS256 tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Option<Keys>,
    validation: Validation,
    ttl_secs: i64,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret_configured", &self.keys.is_some())
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl TokenCodec {
    /// An empty secret yields a codec on which every operation fails with
    /// [`TokenError::MissingSecret`].
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let keys = (!secret.is_empty()).then(|| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        // Expiry is exact: no grace period past `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys,
            validation,
            ttl_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.token_secret, config.token_ttl_secs)
    }

    /// Issues a token for `subject` that expires after the configured TTL.
    pub fn sign(&self, subject: Uuid) -> Result<String, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        let now = Utc::now().timestamp();
        let claims = Claims {
            id: subject,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| TokenError::InvalidToken(format!("failed to encode: {}", e)))
    }

    /// Checks signature and expiry and returns the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(format!("{:?}", e.kind())))
    }
}
