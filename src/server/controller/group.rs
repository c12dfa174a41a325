use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ConflictDto, ErrorDto, MessageDto},
        group::{
            GroupCreatedDto, GroupInvitePayload, GroupItemPayload, GroupListDto, GroupPayload,
        },
    },
    server::{
        controller::util::json::ApiJson, error::Error, middleware::auth::CurrentUser,
        model::app::AppState, service::group::GroupService,
    },
};

pub static GROUP_TAG: &str = "group";

/// List the user's groups along with the shared items that can be attached to them
#[utoipa::path(
    get,
    path = "/api/user-group",
    tag = GROUP_TAG,
    responses(
        (status = 200, description = "Groups, shared items and group types", body = GroupListDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let groups = GroupService::new(&state.db).list(user.id).await?;

    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/api/user-group",
    tag = GROUP_TAG,
    request_body = GroupPayload,
    responses(
        (status = 201, description = "Group created", body = GroupCreatedDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Group name already exists", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<GroupPayload>,
) -> Result<impl IntoResponse, Error> {
    let created = GroupService::new(&state.db).create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a group with its members and invites
///
/// Fails with 409 while incomes, expenses or assets are still attached.
#[utoipa::path(
    delete,
    path = "/api/user-group/{id}",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group deleted", body = MessageDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 409, description = "Items still attached", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let message = GroupService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(message))
}

/// Attach an income, expense or asset of the user to the group
///
/// The body names the item as `income_<id>`, `expense_<id>` or `asset_<id>`.
#[utoipa::path(
    post,
    path = "/api/user-group/{id}/items",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    request_body = GroupItemPayload,
    responses(
        (status = 201, description = "Item attached", body = MessageDto),
        (status = 400, description = "Invalid item selector", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Group or item not found", body = ErrorDto),
        (status = 409, description = "Item already attached", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn attach_group_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<GroupItemPayload>,
) -> Result<impl IntoResponse, Error> {
    let message = GroupService::new(&state.db)
        .attach_item(user.id, id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    delete,
    path = "/api/user-group/{id}/items/{item}",
    tag = GROUP_TAG,
    params(
        ("id" = i32, Path, description = "Group ID"),
        ("item" = String, Path, description = "Item selector such as `income_4`")
    ),
    responses(
        (status = 200, description = "Item detached", body = MessageDto),
        (status = 400, description = "Invalid item selector", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn detach_group_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((id, item)): Path<(i32, String)>,
) -> Result<impl IntoResponse, Error> {
    GroupService::new(&state.db)
        .detach_item(user.id, id, &item)
        .await?;

    Ok(Json(MessageDto {
        message: "Item removed from group successfully".to_string(),
    }))
}

/// Invite someone to the group by email
///
/// A registered user becomes an inactive member, any other email gets a pending invite.
#[utoipa::path(
    post,
    path = "/api/user-group/{id}/invites",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    request_body = GroupInvitePayload,
    responses(
        (status = 200, description = "Member added or invite recorded", body = MessageDto),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 409, description = "Already invited", body = ConflictDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn invite_to_group(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<GroupInvitePayload>,
) -> Result<impl IntoResponse, Error> {
    let message = GroupService::new(&state.db)
        .invite(user.id, id, payload)
        .await?;

    Ok(Json(message))
}
