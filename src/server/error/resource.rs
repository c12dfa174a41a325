use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};

use crate::{
    model::api::{ConflictDto, ErrorDto},
    server::error::Error,
};

#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// Holds the client-facing message, e.g. "Asset not found".
    #[error("{0}")]
    NotFound(String),
    /// Unique key already taken.
    #[error("{error}: {message}")]
    Conflict { error: String, message: String },
    /// Row is still referenced by another table.
    #[error("{message} ({relation})")]
    ForeignKeyViolation { relation: String, message: String },
}

impl ResourceError {
    pub fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    pub fn conflict(error: &str, message: &str) -> Self {
        Self::Conflict {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: message })).into_response()
            }
            Self::Conflict { error, message } => {
                (StatusCode::CONFLICT, Json(ConflictDto { error, message })).into_response()
            }
            Self::ForeignKeyViolation { relation, message } => (
                StatusCode::CONFLICT,
                Json(ConflictDto {
                    error: format!("Foreign key violation on {relation}"),
                    message,
                }),
            )
                .into_response(),
        }
    }
}

/// Maps unique violations to a 409 with the given messages.
///
/// Other database errors pass through unchanged.
pub fn map_unique_violation(err: DbErr, error: &str, message: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violation: {}", detail);

            ResourceError::conflict(error, message).into()
        }
        _ => err.into(),
    }
}

/// Maps foreign key violations to a 409 naming the relation and carrying the given message.
///
/// Other database errors pass through unchanged.
pub fn map_foreign_key_violation(err: DbErr, relation: &str, message: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!("Foreign key constraint violation: {}", detail);

            ResourceError::ForeignKeyViolation {
                relation: relation.to_string(),
                message: message.to_string(),
            }
            .into()
        }
        _ => err.into(),
    }
}
