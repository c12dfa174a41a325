use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000001_reference_tables::AssetType, m20250301_000002_user::User,
    m20250301_000003_tax::Tax,
};

static IDX_USER_ASSET_USER_TYPE_NAME: &str = "idx_user_asset_user_id_asset_type_id_name";
static IDX_USER_ASSET_TAX_ASSET_TAX: &str = "idx_user_asset_tax_user_asset_id_tax_id";
static FK_USER_ASSET_USER_ID: &str = "fk_user_asset_user_id";
static FK_USER_ASSET_ASSET_TYPE_ID: &str = "fk_user_asset_asset_type_id";
static FK_USER_ASSET_TAX_USER_ASSET_ID: &str = "fk_user_asset_tax_user_asset_id";
static FK_USER_ASSET_TAX_TAX_ID: &str = "fk_user_asset_tax_tax_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAsset::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAsset::Id))
                    .col(integer(UserAsset::UserId))
                    .col(integer(UserAsset::AssetTypeId))
                    .col(string(UserAsset::Name))
                    .col(date(UserAsset::AcquisitionDate))
                    .col(date_null(UserAsset::DispositionDate))
                    .col(decimal_len(UserAsset::Value, 10, 2))
                    .col(boolean(UserAsset::Shared).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_ASSET_USER_ID)
                            .from(UserAsset::Table, UserAsset::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_ASSET_ASSET_TYPE_ID)
                            .from(UserAsset::Table, UserAsset::AssetTypeId)
                            .to(AssetType::Table, AssetType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_ASSET_USER_TYPE_NAME)
                    .table(UserAsset::Table)
                    .col(UserAsset::UserId)
                    .col(UserAsset::AssetTypeId)
                    .col(UserAsset::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAssetTax::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAssetTax::Id))
                    .col(integer(UserAssetTax::UserAssetId))
                    .col(integer(UserAssetTax::TaxId))
                    .col(decimal_len(UserAssetTax::TaxValue, 10, 2))
                    .col(boolean(UserAssetTax::Paid).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_ASSET_TAX_USER_ASSET_ID)
                            .from(UserAssetTax::Table, UserAssetTax::UserAssetId)
                            .to(UserAsset::Table, UserAsset::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_ASSET_TAX_TAX_ID)
                            .from(UserAssetTax::Table, UserAssetTax::TaxId)
                            .to(Tax::Table, Tax::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_ASSET_TAX_ASSET_TAX)
                    .table(UserAssetTax::Table)
                    .col(UserAssetTax::UserAssetId)
                    .col(UserAssetTax::TaxId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAssetTax::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserAsset::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserAsset {
    Table,
    Id,
    UserId,
    AssetTypeId,
    Name,
    AcquisitionDate,
    DispositionDate,
    Value,
    Shared,
}

#[derive(DeriveIden)]
enum UserAssetTax {
    Table,
    Id,
    UserAssetId,
    TaxId,
    TaxValue,
    Paid,
}
