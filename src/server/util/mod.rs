//! Reusable helpers for services and controllers: session token signing, password
//! hashing, date and amount parsing, and field validation.

pub mod date;
pub mod money;
pub mod password;
pub mod token;
pub mod validation;
