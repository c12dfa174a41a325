use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        income::{IncomeDto, IncomePayload, IncomeTaxPayload},
    },
    server::{
        controller::util::json::ApiJson,
        error::Error,
        middleware::auth::CurrentUser,
        model::{app::AppState, procedure::ProcedureResult},
        service::income::IncomeService,
    },
};

pub static INCOME_TAG: &str = "income";

#[utoipa::path(
    get,
    path = "/api/income",
    tag = INCOME_TAG,
    responses(
        (status = 200, description = "Incomes of the user with their taxes", body = Vec<IncomeDto>),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_incomes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let incomes = IncomeService::new(&state.db).list(user.id).await?;

    Ok(Json(incomes))
}

/// Create an income
///
/// `OwningPercentage` defaults to 100 when omitted.
#[utoipa::path(
    post,
    path = "/api/income",
    tag = INCOME_TAG,
    request_body = IncomePayload,
    responses(
        (status = 201, description = "Income created", body = IncomeDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Income name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_income(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<IncomePayload>,
) -> Result<impl IntoResponse, Error> {
    let income = IncomeService::new(&state.db).create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(income)))
}

#[utoipa::path(
    get,
    path = "/api/income/{id}",
    tag = INCOME_TAG,
    params(("id" = i32, Path, description = "Income ID")),
    responses(
        (status = 200, description = "The income", body = IncomeDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Income not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_income(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let income = IncomeService::new(&state.db).get(user.id, id).await?;

    Ok(Json(income))
}

#[utoipa::path(
    put,
    path = "/api/income/{id}",
    tag = INCOME_TAG,
    params(("id" = i32, Path, description = "Income ID")),
    request_body = IncomePayload,
    responses(
        (status = 200, description = "Income updated", body = IncomeDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Income not found", body = ErrorDto),
        (status = 409, description = "Income name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_income(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<IncomePayload>,
) -> Result<impl IntoResponse, Error> {
    let income = IncomeService::new(&state.db)
        .update(user.id, id, payload)
        .await?;

    Ok(Json(income))
}

/// Delete an income with its tax rows and group links
#[utoipa::path(
    delete,
    path = "/api/income/{id}",
    tag = INCOME_TAG,
    params(("id" = i32, Path, description = "Income ID")),
    responses(
        (status = 200, description = "Income deleted", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_income(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    IncomeService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(MessageDto {
        message: "Income deleted successfully".to_string(),
    }))
}

/// Apply one of the user's `Income` taxes to an income
///
/// Business-rule failures come back as `{"status":"fail"}` with a 400.
///
/// # Responses
/// - 200 (Success): Tax applied
/// - 400 (Bad Request): Missing `TaxID`, or a rule failed (unknown income or tax, wrong tax
///   type, already applied)
/// - 401 (Unauthorized): No valid session
#[utoipa::path(
    post,
    path = "/api/income/{id}/taxes",
    tag = INCOME_TAG,
    params(("id" = i32, Path, description = "Income ID")),
    request_body = IncomeTaxPayload,
    responses(
        (status = 200, description = "Tax applied", body = ProcedureResult),
        (status = 400, description = "Tax could not be applied", body = ProcedureResult),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn attach_income_tax(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<IncomeTaxPayload>,
) -> Result<impl IntoResponse, Error> {
    let result = IncomeService::new(&state.db)
        .attach_tax(user.id, id, payload)
        .await?;

    Ok(result)
}

#[utoipa::path(
    delete,
    path = "/api/income/{id}/taxes/{tax_id}",
    tag = INCOME_TAG,
    params(
        ("id" = i32, Path, description = "Income ID"),
        ("tax_id" = i32, Path, description = "Tax ID")
    ),
    responses(
        (status = 200, description = "Tax removed from the income", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn detach_income_tax(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((id, tax_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    IncomeService::new(&state.db)
        .detach_tax(user.id, id, tax_id)
        .await?;

    Ok(Json(MessageDto {
        message: "Tax removed from income successfully".to_string(),
    }))
}
