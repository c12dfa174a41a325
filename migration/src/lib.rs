pub use sea_orm_migration::prelude::*;

mod m20250301_000001_reference_tables;
mod m20250301_000002_user;
mod m20250301_000003_tax;
mod m20250301_000004_user_asset;
mod m20250301_000005_user_income;
mod m20250301_000006_user_expense;
mod m20250301_000007_user_category;
mod m20250301_000008_user_group;
mod m20250301_000009_group_item;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_reference_tables::Migration),
            Box::new(m20250301_000002_user::Migration),
            Box::new(m20250301_000003_tax::Migration),
            Box::new(m20250301_000004_user_asset::Migration),
            Box::new(m20250301_000005_user_income::Migration),
            Box::new(m20250301_000006_user_expense::Migration),
            Box::new(m20250301_000007_user_category::Migration),
            Box::new(m20250301_000008_user_group::Migration),
            Box::new(m20250301_000009_group_item::Migration),
        ]
    }
}
