use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000001_reference_tables::IncomeType, m20250301_000002_user::User,
    m20250301_000003_tax::Tax,
};

static IDX_USER_INCOME_USER_NAME: &str = "idx_user_income_user_id_name";
static IDX_USER_INCOME_TAX_INCOME_TAX: &str = "idx_user_income_tax_user_income_id_tax_id";
static FK_USER_INCOME_USER_ID: &str = "fk_user_income_user_id";
static FK_USER_INCOME_INCOME_TYPE_ID: &str = "fk_user_income_income_type_id";
static FK_USER_INCOME_TAX_USER_INCOME_ID: &str = "fk_user_income_tax_user_income_id";
static FK_USER_INCOME_TAX_TAX_ID: &str = "fk_user_income_tax_tax_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserIncome::Table)
                    .if_not_exists()
                    .col(pk_auto(UserIncome::Id))
                    .col(integer(UserIncome::UserId))
                    .col(integer(UserIncome::IncomeTypeId))
                    .col(string(UserIncome::Name))
                    .col(decimal_len(UserIncome::Value, 10, 2))
                    .col(string(UserIncome::Recurrence))
                    .col(date(UserIncome::StartDate))
                    .col(date_null(UserIncome::EndDate))
                    .col(boolean(UserIncome::Shared).default(false))
                    .col(decimal_len(UserIncome::OwningPercentage, 5, 2).default(100))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_INCOME_USER_ID)
                            .from(UserIncome::Table, UserIncome::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_INCOME_INCOME_TYPE_ID)
                            .from(UserIncome::Table, UserIncome::IncomeTypeId)
                            .to(IncomeType::Table, IncomeType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_INCOME_USER_NAME)
                    .table(UserIncome::Table)
                    .col(UserIncome::UserId)
                    .col(UserIncome::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserIncomeTax::Table)
                    .if_not_exists()
                    .col(pk_auto(UserIncomeTax::Id))
                    .col(integer(UserIncomeTax::UserIncomeId))
                    .col(integer(UserIncomeTax::TaxId))
                    .col(decimal_len(UserIncomeTax::TaxValue, 10, 2))
                    .col(boolean(UserIncomeTax::Paid).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_INCOME_TAX_USER_INCOME_ID)
                            .from(UserIncomeTax::Table, UserIncomeTax::UserIncomeId)
                            .to(UserIncome::Table, UserIncome::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_INCOME_TAX_TAX_ID)
                            .from(UserIncomeTax::Table, UserIncomeTax::TaxId)
                            .to(Tax::Table, Tax::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_INCOME_TAX_INCOME_TAX)
                    .table(UserIncomeTax::Table)
                    .col(UserIncomeTax::UserIncomeId)
                    .col(UserIncomeTax::TaxId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserIncomeTax::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserIncome::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserIncome {
    Table,
    Id,
    UserId,
    IncomeTypeId,
    Name,
    Value,
    Recurrence,
    StartDate,
    EndDate,
    Shared,
    OwningPercentage,
}

#[derive(DeriveIden)]
enum UserIncomeTax {
    Table,
    Id,
    UserIncomeId,
    TaxId,
    TaxValue,
    Paid,
}
