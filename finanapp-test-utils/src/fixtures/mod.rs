//! Row fixtures inserted during test execution.
//!
//! - `reference` - lookup tables matching the seed pass
//! - `user` - user accounts with hashed fixture passwords
//! - `finance` - taxes, assets, incomes, expenses and categories
//! - `group` - groups, members, invites and shared item links

pub mod finance;
pub mod group;
pub mod reference;
pub mod user;

use chrono::NaiveDate;

/// Fixed date used for every fixture acquisition or start date.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid fixture date")
}
