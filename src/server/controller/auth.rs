use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, StatusMessageDto, ValidationErrorsDto},
        auth::{AuthStatusDto, LoginDto, LoginResponseDto, RegisterDto},
    },
    server::{
        controller::util::{
            cookie::{expired_session_cookie, session_cookie, session_token},
            json::ApiJson,
        },
        error::Error,
        middleware::auth::CurrentUser,
        model::app::AppState,
        service::{auth::AuthService, user::UserService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with email and password
///
/// Sets the `user_session` cookie on success and also returns the token in the body.
///
/// # Responses
/// - 200 (Success): Logged in, session cookie set
/// - 400 (Bad Request): Email or password missing, or body is not valid JSON
/// - 401 (Unauthorized): Unknown email or wrong password
/// - 500 (Internal Server Error): Database, session cache or token signing failure
#[utoipa::path(
    post,
    path = "/api/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponseDto),
        (status = 400, description = "Missing credentials", body = ErrorDto),
        (status = 401, description = "Invalid user or credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, state.session_cache.as_ref(), &state.token_codec)
        .login(payload)
        .await?;

    let cookie = session_cookie(response.token.clone());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(response),
    ))
}

/// Register a new user account
///
/// Every validation failure is reported at once.
///
/// # Responses
/// - 201 (Created): User registered
/// - 400 (Bad Request): Invalid fields, or the email is already in use
/// - 500 (Internal Server Error): Database or hashing failure
#[utoipa::path(
    post,
    path = "/api/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User registered", body = StatusMessageDto),
        (status = 400, description = "Validation failed", body = ValidationErrorsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, state.session_cache.as_ref(), &state.token_codec)
        .register(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log out and expire the session cookie
///
/// Succeeds without a session cookie.
///
/// # Responses
/// - 200 (Success): Logged out
/// - 500 (Internal Server Error): Session cache failure
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let token = session_token(&headers);

    AuthService::new(&state.db, state.session_cache.as_ref(), &state.token_codec)
        .logout(token.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie().to_string())],
        Json(MessageDto {
            message: "Successfully logged out".to_string(),
        }),
    ))
}

/// Report the authenticated user
#[utoipa::path(
    get,
    path = "/api/auth-status",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authenticated", body = AuthStatusDto),
        (status = 401, description = "Unauthorized", body = ErrorDto)
    ),
)]
pub async fn auth_status(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(UserService::auth_status(&user))
}
