use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorsDto},
        user::{DashboardDto, ProfileUpdateDto, ProfileUpdatedDto},
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Get the dashboard of the logged in user
///
/// # Responses
/// - 200 (Success): The user with their assets, incomes, expenses, taxes and groups
/// - 401 (Unauthorized): No valid session
/// - 500 (Internal Server Error): Database failure
#[utoipa::path(
    get,
    path = "/api/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "User dashboard", body = DashboardDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let dashboard = UserService::new(&state.db).dashboard(user).await?;

    Ok(Json(dashboard))
}

/// Update the name and date of birth of the logged in user
#[utoipa::path(
    post,
    path = "/api/user-edit",
    tag = USER_TAG,
    request_body = ProfileUpdateDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdatedDto),
        (status = 400, description = "Validation failed", body = ValidationErrorsDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_user(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<ProfileUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    let updated = UserService::new(&state.db)
        .update_profile(user.id, payload)
        .await?;

    Ok(Json(updated))
}
