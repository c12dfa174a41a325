//! Error types for the finanapp server.
//!
//! Domain errors (authentication, session tokens, validation, resources, configuration and
//! the worker queue) each live in their own module and implement `IntoResponse` with the
//! status code and JSON body the API promises for them. [`Error`] aggregates them together
//! with infrastructure errors so controllers can use `?` throughout.

pub mod auth;
pub mod config;
pub mod resource;
pub mod token;
pub mod validation;
pub mod worker;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, resource::ResourceError, token::TokenError,
        validation::ValidationError, worker::WorkerError,
    },
};

/// Main error type for the finanapp server.
///
/// Uses `#[from]` so domain and library errors convert with `?`. Anything without a
/// dedicated response mapping becomes a logged 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid environment variables.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Missing session, unknown user or bad credentials.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Session token could not be issued or verified.
    #[error(transparent)]
    TokenError(#[from] TokenError),
    /// Request payload failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Target row missing, duplicated or still referenced.
    #[error(transparent)]
    ResourceError(#[from] ResourceError),
    /// Background message queue failure.
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Failed to parse a value read back from a store.
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// A state the code assumes cannot happen, such as a row vanishing mid-transaction.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis session cache error.
    #[error(transparent)]
    SessionCacheError(#[from] fred::prelude::Error),
    /// Redis connection error for the message queue.
    #[error(transparent)]
    ApalisRedisError(#[from] apalis_redis::RedisError),
    /// Password hashing failure.
    #[error("Password hashing failed: {0}")]
    PasswordHashError(argon2::password_hash::Error),
    /// Socket bind or serve failure.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHashError(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::TokenError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::ResourceError(err) => err.into_response(),
            Self::WorkerError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a logged 500 response.
///
/// The client only sees a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for Error {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ValidationError::InvalidJson(rejection.body_text()).into()
    }
}
