use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_reference_tables::UserType;

static FK_USER_USER_TYPE_ID: &str = "fk_user_user_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(integer(User::UserTypeId))
                    .col(string(User::Password))
                    .col(string(User::FirstName))
                    .col(string(User::LastName).default(""))
                    .col(string_uniq(User::EmailAddress))
                    .col(date_null(User::DateOfBirth))
                    .col(boolean(User::IsActive).default(true))
                    .col(timestamp_null(User::LastLogin))
                    .col(timestamp(User::CreatedAt))
                    .col(timestamp(User::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_USER_TYPE_ID)
                            .from(User::Table, User::UserTypeId)
                            .to(UserType::Table, UserType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    UserTypeId,
    Password,
    FirstName,
    LastName,
    EmailAddress,
    DateOfBirth,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
