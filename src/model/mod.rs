//! Request and response DTOs shared by controllers and tests.

pub mod api;
pub mod asset;
pub mod auth;
pub mod category;
pub mod expense;
pub mod group;
pub mod income;
pub mod tax;
pub mod user;
