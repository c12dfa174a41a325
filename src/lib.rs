//! Personal and shared finance backend.
//!
//! `model` holds the JSON DTOs exchanged over HTTP, `server` holds everything that
//! runs inside the axum process.

pub mod model;
pub mod server;
