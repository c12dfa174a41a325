use axum::response::IntoResponse;

pub static HEALTH_TAG: &str = "health";

/// Liveness check, needs no session
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    ),
)]
pub async fn health() -> impl IntoResponse {
    "Server working properly"
}
