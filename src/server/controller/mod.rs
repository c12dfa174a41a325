//! HTTP controller endpoints for the finanapp JSON API.
//!
//! Controllers extract the authenticated user and the request body, call the matching
//! service and map the result to a status code. Every handler is annotated for the
//! OpenAPI document served at `/api/docs`.

pub mod asset;
pub mod auth;
pub mod category;
pub mod expense;
pub mod group;
pub mod health;
pub mod income;
pub mod tax;
pub mod user;
pub mod util;
