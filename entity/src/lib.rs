//! SeaORM entities for the finanapp schema.

pub mod prelude;

pub mod asset_type;
pub mod currency;
pub mod expenditure_type;
pub mod file_type;
pub mod group_asset;
pub mod group_expense;
pub mod group_income;
pub mod group_invite;
pub mod group_member;
pub mod group_type;
pub mod income_type;
pub mod recurrency;
pub mod tax;
pub mod tax_type;
pub mod user;
pub mod user_asset;
pub mod user_asset_tax;
pub mod user_category;
pub mod user_expense;
pub mod user_group;
pub mod user_income;
pub mod user_income_tax;
pub mod user_role;
pub mod user_type;
