use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        tax::{TaxDto, TaxPayload},
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::tax::TaxService,
    },
};

pub static TAX_TAG: &str = "tax";

#[utoipa::path(
    get,
    path = "/api/taxes",
    tag = TAX_TAG,
    responses(
        (status = 200, description = "Taxes of the user", body = Vec<TaxDto>),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_taxes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let taxes = TaxService::new(&state.db).list(user.id).await?;

    Ok(Json(taxes))
}

/// Create a tax
///
/// `TaxPercentage` must be between 0 and 100.
#[utoipa::path(
    post,
    path = "/api/taxes",
    tag = TAX_TAG,
    request_body = TaxPayload,
    responses(
        (status = 201, description = "Tax created", body = TaxDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Tax name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_tax(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<TaxPayload>,
) -> Result<impl IntoResponse, Error> {
    let tax = TaxService::new(&state.db).create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(tax)))
}

/// Replace every field of a tax
///
/// Tax values already computed for assets and incomes are not recalculated.
#[utoipa::path(
    put,
    path = "/api/taxes/{id}",
    tag = TAX_TAG,
    params(("id" = i32, Path, description = "Tax ID")),
    request_body = TaxPayload,
    responses(
        (status = 200, description = "Tax updated", body = TaxDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Tax not found", body = ErrorDto),
        (status = 409, description = "Tax name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_tax(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<TaxPayload>,
) -> Result<impl IntoResponse, Error> {
    let tax = TaxService::new(&state.db)
        .update(user.id, id, payload)
        .await?;

    Ok(Json(tax))
}

/// Delete a tax that is no longer applied to any asset or income
#[utoipa::path(
    delete,
    path = "/api/taxes/{id}",
    tag = TAX_TAG,
    params(("id" = i32, Path, description = "Tax ID")),
    responses(
        (status = 200, description = "Tax deleted", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Tax is still applied", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_tax(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    TaxService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(MessageDto {
        message: "Tax deleted successfully".to_string(),
    }))
}
