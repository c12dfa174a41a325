use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        expense::{ExpenseDto, ExpensePayload},
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::expense::ExpenseService,
    },
};

pub static EXPENSE_TAG: &str = "expense";

#[utoipa::path(
    get,
    path = "/api/expense",
    tag = EXPENSE_TAG,
    responses(
        (status = 200, description = "Expenses of the user", body = Vec<ExpenseDto>),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let expenses = ExpenseService::new(&state.db).list(user.id).await?;

    Ok(Json(expenses))
}

#[utoipa::path(
    post,
    path = "/api/expense",
    tag = EXPENSE_TAG,
    request_body = ExpensePayload,
    responses(
        (status = 201, description = "Expense created", body = ExpenseDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Expense name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<ExpensePayload>,
) -> Result<impl IntoResponse, Error> {
    let expense = ExpenseService::new(&state.db)
        .create(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/expense/{id}",
    tag = EXPENSE_TAG,
    params(("id" = i32, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "The expense", body = ExpenseDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Expense not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let expense = ExpenseService::new(&state.db).get(user.id, id).await?;

    Ok(Json(expense))
}

#[utoipa::path(
    put,
    path = "/api/expense/{id}",
    tag = EXPENSE_TAG,
    params(("id" = i32, Path, description = "Expense ID")),
    request_body = ExpensePayload,
    responses(
        (status = 200, description = "Expense updated", body = ExpenseDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Expense not found", body = ErrorDto),
        (status = 409, description = "Expense name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ExpensePayload>,
) -> Result<impl IntoResponse, Error> {
    let expense = ExpenseService::new(&state.db)
        .update(user.id, id, payload)
        .await?;

    Ok(Json(expense))
}

/// Delete an expense and detach it from every group
#[utoipa::path(
    delete,
    path = "/api/expense/{id}",
    tag = EXPENSE_TAG,
    params(("id" = i32, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Expense deleted", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ExpenseService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(MessageDto {
        message: "Expense deleted successfully".to_string(),
    }))
}
