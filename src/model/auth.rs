use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDto {
    pub email: String,
    pub first_name: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponseDto {
    pub status: String,
    pub user: LoginUserDto,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusDto {
    pub authenticated: bool,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}
