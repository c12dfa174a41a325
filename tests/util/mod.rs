//! Router-level helpers for integration tests backed by the in-memory SQLite setup.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use finanapp::server::{
    model::{app::AppState, session::MemorySessionCache},
    router,
    util::token::SessionTokenCodec,
};
use finanapp_test_utils::{constant::TEST_JWT_SECRET, TestSetup};
use serde_json::Value;
use tower::ServiceExt;

/// Extension trait building the application on top of a [`TestSetup`] database
pub trait TestSetupExt {
    fn app_state(&self) -> AppState;

    fn app(&self) -> Router;
}

impl TestSetupExt for TestSetup {
    fn app_state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
            session_cache: Arc::new(MemorySessionCache::new()),
            token_codec: SessionTokenCodec::new(TEST_JWT_SECRET),
        }
    }

    fn app(&self) -> Router {
        router::routes(self.app_state())
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

/// Logs in through `/api/login` and returns the `name=value` pair to send back as a cookie.
pub async fn login_cookie(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        request(
            Method::POST,
            "/api/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}
