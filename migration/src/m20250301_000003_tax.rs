use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250301_000001_reference_tables::TaxType, m20250301_000002_user::User};

static IDX_TAX_USER_NAME_TYPE: &str = "idx_tax_user_id_name_tax_type_id";
static FK_TAX_USER_ID: &str = "fk_tax_user_id";
static FK_TAX_TAX_TYPE_ID: &str = "fk_tax_tax_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tax::Table)
                    .if_not_exists()
                    .col(pk_auto(Tax::Id))
                    .col(integer(Tax::UserId))
                    .col(integer(Tax::TaxTypeId))
                    .col(string(Tax::Name))
                    .col(decimal_len(Tax::Percentage, 5, 2))
                    .col(string(Tax::PercentageRange))
                    .col(string(Tax::ApplicableCycle))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TAX_USER_ID)
                            .from(Tax::Table, Tax::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TAX_TAX_TYPE_ID)
                            .from(Tax::Table, Tax::TaxTypeId)
                            .to(TaxType::Table, TaxType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TAX_USER_NAME_TYPE)
                    .table(Tax::Table)
                    .col(Tax::UserId)
                    .col(Tax::Name)
                    .col(Tax::TaxTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TAX_USER_NAME_TYPE)
                    .table(Tax::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Tax::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Tax {
    Table,
    Id,
    UserId,
    TaxTypeId,
    Name,
    Percentage,
    PercentageRange,
    ApplicableCycle,
}
