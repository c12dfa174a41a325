//! Startup configuration errors.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required variable absent or blank, e.g. `DATABASE_URL` or `JWT_SECRET`.
    #[error("{0} must be set")]
    MissingEnvVar(String),
    #[error("{var} has an invalid value: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    /// `ALLOWED_ORIGIN` cannot be sent back in the CORS allow-origin header.
    #[error("ALLOWED_ORIGIN {0:?} is not a valid origin")]
    InvalidOrigin(String),
    #[error("WORKERS must be at least 1")]
    NoWorkers,
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
