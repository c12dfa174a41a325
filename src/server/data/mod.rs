//! Data access layer repositories.
//!
//! Each repository wraps one table (or a parent table and its join rows) and is generic
//! over [`sea_orm::ConnectionTrait`] so the same calls run on a pooled connection or
//! inside a transaction opened by a service.

pub mod asset;
pub mod category;
pub mod expense;
pub mod group;
pub mod income;
pub mod reference;
pub mod tax;
pub mod user;
