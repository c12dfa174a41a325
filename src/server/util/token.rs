//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the user's email, a 24 hour expiry and a random `jti`
//! so that two logins in the same second still produce distinct tokens. There is no
//! refresh; an expired token requires a new login.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::server::error::token::TokenError;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub exp: i64,
    pub jti: String,
}

#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionTokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token for `email` expiring [`TOKEN_TTL_HOURS`] from now.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_with_expiry(email, Utc::now() + Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn issue_with_expiry(
        &self,
        email: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims {
            email: email.to_string(),
            exp: expires_at.timestamp(),
            jti: format!("{:032x}", rand::rng().random::<u128>()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
