use axum::extract::FromRequest;

use crate::server::error::Error;

/// `axum::Json` whose rejections answer `400 {"error":"Error decoding JSON"}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
