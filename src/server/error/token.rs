use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{auth::AuthError, InternalServerError};

/// Session token codec errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token was signed with another algorithm or key.
    #[error("Session token signature is invalid")]
    InvalidSignature,
    /// Token expiry is in the past.
    #[error("Session token has expired")]
    Expired,
    /// Token could not be decoded.
    #[error("Session token is malformed: {0}")]
    Malformed(String),
    /// Token could not be signed.
    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        match self {
            Self::Signing(_) => InternalServerError(self).into_response(),
            err => {
                tracing::debug!("{}", err);

                AuthError::Unauthorized.into_response()
            }
        }
    }
}
