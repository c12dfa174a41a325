use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000004_user_asset::UserAsset, m20250301_000005_user_income::UserIncome,
    m20250301_000006_user_expense::UserExpense, m20250301_000008_user_group::UserGroup,
};

static IDX_GROUP_INCOME_GROUP_INCOME: &str = "idx_group_income_group_id_user_income_id";
static IDX_GROUP_EXPENSE_GROUP_EXPENSE: &str = "idx_group_expense_group_id_user_expense_id";
static IDX_GROUP_ASSET_GROUP_ASSET: &str = "idx_group_asset_group_id_user_asset_id";
static FK_GROUP_INCOME_GROUP_ID: &str = "fk_group_income_group_id";
static FK_GROUP_INCOME_USER_INCOME_ID: &str = "fk_group_income_user_income_id";
static FK_GROUP_EXPENSE_GROUP_ID: &str = "fk_group_expense_group_id";
static FK_GROUP_EXPENSE_USER_EXPENSE_ID: &str = "fk_group_expense_user_expense_id";
static FK_GROUP_ASSET_GROUP_ID: &str = "fk_group_asset_group_id";
static FK_GROUP_ASSET_USER_ASSET_ID: &str = "fk_group_asset_user_asset_id";

/// Group item links reference the group without a delete action so a group
/// still holding items cannot be removed.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupIncome::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupIncome::Id))
                    .col(integer(GroupIncome::GroupId))
                    .col(integer(GroupIncome::UserIncomeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_INCOME_GROUP_ID)
                            .from(GroupIncome::Table, GroupIncome::GroupId)
                            .to(UserGroup::Table, UserGroup::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_INCOME_USER_INCOME_ID)
                            .from(GroupIncome::Table, GroupIncome::UserIncomeId)
                            .to(UserIncome::Table, UserIncome::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_INCOME_GROUP_INCOME)
                    .table(GroupIncome::Table)
                    .col(GroupIncome::GroupId)
                    .col(GroupIncome::UserIncomeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupExpense::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupExpense::Id))
                    .col(integer(GroupExpense::GroupId))
                    .col(integer(GroupExpense::UserExpenseId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_EXPENSE_GROUP_ID)
                            .from(GroupExpense::Table, GroupExpense::GroupId)
                            .to(UserGroup::Table, UserGroup::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_EXPENSE_USER_EXPENSE_ID)
                            .from(GroupExpense::Table, GroupExpense::UserExpenseId)
                            .to(UserExpense::Table, UserExpense::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_EXPENSE_GROUP_EXPENSE)
                    .table(GroupExpense::Table)
                    .col(GroupExpense::GroupId)
                    .col(GroupExpense::UserExpenseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupAsset::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupAsset::Id))
                    .col(integer(GroupAsset::GroupId))
                    .col(integer(GroupAsset::UserAssetId))
                    .col(decimal_len(GroupAsset::OwningPercentage, 5, 2).default(100))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_ASSET_GROUP_ID)
                            .from(GroupAsset::Table, GroupAsset::GroupId)
                            .to(UserGroup::Table, UserGroup::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_ASSET_USER_ASSET_ID)
                            .from(GroupAsset::Table, GroupAsset::UserAssetId)
                            .to(UserAsset::Table, UserAsset::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_ASSET_GROUP_ASSET)
                    .table(GroupAsset::Table)
                    .col(GroupAsset::GroupId)
                    .col(GroupAsset::UserAssetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupAsset::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupExpense::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupIncome::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum GroupIncome {
    Table,
    Id,
    GroupId,
    UserIncomeId,
}

#[derive(DeriveIden)]
enum GroupExpense {
    Table,
    Id,
    GroupId,
    UserExpenseId,
}

#[derive(DeriveIden)]
enum GroupAsset {
    Table,
    Id,
    GroupId,
    UserAssetId,
    OwningPercentage,
}
