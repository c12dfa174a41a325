use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request has no valid user session")]
    Unauthorized,
    #[error("No user registered with email {0:?}")]
    InvalidUser(String),
    #[error("Wrong password for email {0:?}")]
    InvalidCredentials(String),
    #[error("Payload owner ID {payload} does not match authenticated user ID {user_id}")]
    OwnerMismatch { payload: i32, user_id: i32 },
}

impl AuthError {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::Unauthorized | Self::OwnerMismatch { .. } => Self::unauthorized("Unauthorized"),
            Self::InvalidUser(_) => Self::unauthorized("Invalid user"),
            Self::InvalidCredentials(_) => Self::unauthorized("Invalid credentials"),
        }
    }
}
