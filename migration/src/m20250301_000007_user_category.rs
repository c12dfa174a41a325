use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000002_user::User;

static IDX_USER_CATEGORY_USER_NAME: &str = "idx_user_category_user_id_name";
static FK_USER_CATEGORY_USER_ID: &str = "fk_user_category_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(UserCategory::Id))
                    .col(integer(UserCategory::UserId))
                    .col(string(UserCategory::Name))
                    .col(boolean(UserCategory::IsActive).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_CATEGORY_USER_ID)
                            .from(UserCategory::Table, UserCategory::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_CATEGORY_USER_NAME)
                    .table(UserCategory::Table)
                    .col(UserCategory::UserId)
                    .col(UserCategory::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCategory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserCategory {
    Table,
    Id,
    UserId,
    Name,
    IsActive,
}
