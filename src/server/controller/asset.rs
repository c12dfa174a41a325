use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        asset::{AssetDto, AssetPayload},
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::asset::AssetService,
    },
};

pub static ASSET_TAG: &str = "asset";

/// List the assets of the logged in user with their taxes
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = ASSET_TAG,
    responses(
        (status = 200, description = "Assets of the user", body = Vec<AssetDto>),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_assets(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let assets = AssetService::new(&state.db).list(user.id).await?;

    Ok(Json(assets))
}

/// Create an asset and apply the listed taxes to it
///
/// # Responses
/// - 201 (Created): The asset with its computed tax rows
/// - 400 (Bad Request): Missing fields, bad amount or date
/// - 401 (Unauthorized): No valid session, or `userID` is not the logged in user
/// - 404 (Not Found): A listed tax does not belong to the user
/// - 409 (Conflict): The user already has an asset with this name
#[utoipa::path(
    post,
    path = "/api/assets",
    tag = ASSET_TAG,
    request_body = AssetPayload,
    responses(
        (status = 201, description = "Asset created", body = AssetDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Tax not found", body = ErrorDto),
        (status = 409, description = "Asset name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_asset(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<AssetPayload>,
) -> Result<impl IntoResponse, Error> {
    let asset = AssetService::new(&state.db).create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = ASSET_TAG,
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "The asset", body = AssetDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Asset not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let asset = AssetService::new(&state.db).get(user.id, id).await?;

    Ok(Json(asset))
}

/// Replace every field of an asset and recompute its taxes
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    tag = ASSET_TAG,
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AssetPayload,
    responses(
        (status = 200, description = "Asset updated", body = AssetDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Asset or tax not found", body = ErrorDto),
        (status = 409, description = "Asset name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_asset(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AssetPayload>,
) -> Result<impl IntoResponse, Error> {
    let asset = AssetService::new(&state.db)
        .update(user.id, id, payload)
        .await?;

    Ok(Json(asset))
}

/// Delete an asset together with its tax rows and group links
///
/// Deleting an unknown id succeeds.
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = ASSET_TAG,
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    AssetService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(MessageDto {
        message: "Asset deleted successfully".to_string(),
    }))
}
