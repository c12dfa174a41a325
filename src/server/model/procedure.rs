use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureStatus {
    Success,
    Fail,
}

/// Outcome of a procedure whose business-rule failures are reported in the body
/// rather than as an error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProcedureResult {
    pub status: ProcedureStatus,
    pub message: String,
}

impl ProcedureResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ProcedureStatus::Success,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ProcedureStatus::Fail,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProcedureStatus::Success
    }
}

impl IntoResponse for ProcedureResult {
    fn into_response(self) -> Response {
        let status = match self.status {
            ProcedureStatus::Success => StatusCode::OK,
            ProcedureStatus::Fail => StatusCode::BAD_REQUEST,
        };

        (status, Json(self)).into_response()
    }
}
