use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::server::{
    controller::util::cookie::session_token,
    error::{auth::AuthError, Error},
    model::app::AppState,
    service::auth::AuthService,
};

/// Authenticated user attached to the request by [`require_user`]
#[derive(Clone, Debug)]
pub struct CurrentUser(pub entity::user::Model);

/// Rejects the request with 401 unless the `user_session` cookie resolves to an active user
///
/// Verifies the token and loads the user row on every request; the decision itself is
/// never cached.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = session_token(request.headers()).ok_or(AuthError::Unauthorized)?;

    let user = AuthService::new(&state.db, state.session_cache.as_ref(), &state.token_codec)
        .authenticate(&token)
        .await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
