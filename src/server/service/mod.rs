//! Service layer for business rules.
//!
//! Services validate request payloads, enforce ownership, run multi-step writes inside a
//! transaction and assemble the response DTOs from repository rows.

pub mod asset;
pub mod auth;
pub mod category;
pub mod expense;
pub mod group;
pub mod income;
pub mod seed;
pub mod tax;
pub mod user;
