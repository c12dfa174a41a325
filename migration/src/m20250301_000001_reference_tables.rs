use sea_orm_migration::{prelude::*, schema::*};

/// Lookup tables sharing the `(id, name)` shape.
fn lookup_table<T: IntoIden>(table: T, id: T, name: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(pk_auto(id))
        .col(string_uniq(name))
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserType::Table)
                    .if_not_exists()
                    .col(pk_auto(UserType::Id))
                    .col(string_uniq(UserType::Name))
                    .col(boolean(UserType::IsActive).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(pk_auto(UserRole::Id))
                    .col(string_uniq(UserRole::Name))
                    .col(boolean(UserRole::ViewPermission).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(lookup_table(AssetType::Table, AssetType::Id, AssetType::Name))
            .await?;
        manager
            .create_table(lookup_table(
                IncomeType::Table,
                IncomeType::Id,
                IncomeType::Name,
            ))
            .await?;
        manager
            .create_table(lookup_table(
                ExpenditureType::Table,
                ExpenditureType::Id,
                ExpenditureType::Name,
            ))
            .await?;
        manager
            .create_table(lookup_table(TaxType::Table, TaxType::Id, TaxType::Name))
            .await?;
        manager
            .create_table(lookup_table(GroupType::Table, GroupType::Id, GroupType::Name))
            .await?;
        manager
            .create_table(lookup_table(FileType::Table, FileType::Id, FileType::Name))
            .await?;
        manager
            .create_table(lookup_table(Currency::Table, Currency::Id, Currency::Name))
            .await?;
        manager
            .create_table(lookup_table(
                Recurrency::Table,
                Recurrency::Id,
                Recurrency::Name,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recurrency::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currency::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FileType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaxType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenditureType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IncomeType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserType {
    Table,
    Id,
    Name,
    IsActive,
}

#[derive(DeriveIden)]
pub enum UserRole {
    Table,
    Id,
    Name,
    ViewPermission,
}

#[derive(DeriveIden)]
pub enum AssetType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum IncomeType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum ExpenditureType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum TaxType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum GroupType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum FileType {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Currency {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Recurrency {
    Table,
    Id,
    Name,
}
