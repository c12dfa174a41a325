use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Error response carrying a short error title and a longer explanation
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConflictDto {
    pub error: String,
    pub message: String,
}

/// Plain confirmation message
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageDto {
    pub message: String,
}

/// `{"status": "...", "message": "..."}` envelope used by registration and
/// procedure-style writes
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusMessageDto {
    pub status: String,
    pub message: String,
}

/// Validation failures collected from a single payload
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidationErrorsDto {
    pub status: String,
    pub message: Vec<String>,
}

/// A lookup table row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReferenceDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

impl ReferenceDto {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An id sent by the client either as a JSON number or as a numeric string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    /// Empty strings and zero count as a missing value.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn to_id(&self) -> Option<i32> {
        match self {
            Self::Number(n) => i32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
        .filter(|id| *id > 0)
    }
}
