//! Message queue error types.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors raised while consuming registration messages. Always a 500 if they reach HTTP.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Message decoded but is missing data the handler needs.
    #[error("Invalid message on queue {queue}: {reason}")]
    InvalidMessage { queue: String, reason: String },
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
