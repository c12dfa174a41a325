use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250301_000001_reference_tables::ExpenditureType, m20250301_000002_user::User};

static IDX_USER_EXPENSE_USER_NAME: &str = "idx_user_expense_user_id_name";
static FK_USER_EXPENSE_USER_ID: &str = "fk_user_expense_user_id";
static FK_USER_EXPENSE_EXPENDITURE_TYPE_ID: &str = "fk_user_expense_expenditure_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserExpense::Table)
                    .if_not_exists()
                    .col(pk_auto(UserExpense::Id))
                    .col(integer(UserExpense::UserId))
                    .col(integer(UserExpense::ExpenditureTypeId))
                    .col(string(UserExpense::Name))
                    .col(decimal_len(UserExpense::Value, 10, 2))
                    .col(string(UserExpense::Recurrence))
                    .col(date(UserExpense::StartDate))
                    .col(date_null(UserExpense::EndDate))
                    .col(boolean(UserExpense::Shared).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_EXPENSE_USER_ID)
                            .from(UserExpense::Table, UserExpense::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_EXPENSE_EXPENDITURE_TYPE_ID)
                            .from(UserExpense::Table, UserExpense::ExpenditureTypeId)
                            .to(ExpenditureType::Table, ExpenditureType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_EXPENSE_USER_NAME)
                    .table(UserExpense::Table)
                    .col(UserExpense::UserId)
                    .col(UserExpense::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserExpense::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserExpense {
    Table,
    Id,
    UserId,
    ExpenditureTypeId,
    Name,
    Value,
    Recurrence,
    StartDate,
    EndDate,
    Shared,
}
