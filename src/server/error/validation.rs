use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ErrorDto, MessageDto, ValidationErrorsDto};

/// Caller input that cannot be accepted. Always a 400.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required fields not filled")]
    RequiredFields,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid date format")]
    InvalidDate,
    /// Numeric field did not parse; holds the payload field name.
    #[error("Error converting {0}")]
    InvalidNumber(&'static str),
    /// Collected field messages, reported together.
    #[error("Validation failed: {0:?}")]
    Messages(Vec<String>),
    #[error("Error decoding JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid GroupItemSelected type")]
    InvalidItemType,
    #[error("Model not found")]
    UnknownModel,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::RequiredFields => (
                StatusCode::BAD_REQUEST,
                Json(MessageDto {
                    message: self.to_string(),
                }),
            )
                .into_response(),
            Self::Messages(messages) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorsDto {
                    status: "error".to_string(),
                    message: messages,
                }),
            )
                .into_response(),
            Self::InvalidJson(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "Error decoding JSON".to_string(),
                }),
            )
                .into_response(),
            err => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
