use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        category::{CategoriesDto, CategoryCreatedDto, CategoryPayload},
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::category::CategoryService,
    },
};

pub static CATEGORY_TAG: &str = "category";

/// List every lookup table together with the user's own categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Reference data and user categories", body = CategoriesDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let categories = CategoryService::new(&state.db).list(user.id).await?;

    Ok(Json(categories))
}

/// Add a row to the lookup table named by `model`, or a category of the user
///
/// # Responses
/// - 201 (Created): Row created
/// - 400 (Bad Request): Missing fields or unknown `model`
/// - 401 (Unauthorized): No valid session, or `userID` is not the logged in user
/// - 409 (Conflict): A row with this name already exists
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = CategoryCreatedDto),
        (status = 400, description = "Invalid payload or model not found", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Category name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<impl IntoResponse, Error> {
    let created = CategoryService::new(&state.db)
        .create(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{kind}/{id}",
    tag = CATEGORY_TAG,
    params(
        ("kind" = String, Path, description = "Model tag such as `assetType` or `userCategory`"),
        ("id" = i32, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageDto),
        (status = 400, description = "Model not found", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Category not found or unauthorized", body = ErrorDto),
        (status = 409, description = "Category still in use", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, Error> {
    CategoryService::new(&state.db)
        .delete(user.id, &kind, id)
        .await?;

    Ok(Json(MessageDto {
        message: "Category deleted successfully!".to_string(),
    }))
}
