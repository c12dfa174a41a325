use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, UpdateResult,
};

/// Parsed asset fields shared by create and update.
pub struct AssetFields {
    pub asset_type_id: i32,
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub disposition_date: Option<NaiveDate>,
    pub value: Decimal,
    pub shared: bool,
}

pub struct AssetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AssetRepository<'a, C> {
    /// Creates a new instance of [`AssetRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        fields: AssetFields,
    ) -> Result<entity::user_asset::Model, DbErr> {
        let asset = entity::user_asset::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            asset_type_id: ActiveValue::Set(fields.asset_type_id),
            name: ActiveValue::Set(fields.name),
            acquisition_date: ActiveValue::Set(fields.acquisition_date),
            disposition_date: ActiveValue::Set(fields.disposition_date),
            value: ActiveValue::Set(fields.value),
            shared: ActiveValue::Set(fields.shared),
            ..Default::default()
        };

        asset.insert(self.db).await
    }

    /// Finds an asset owned by the user together with its type
    pub async fn find_owned(
        &self,
        asset_id: i32,
        user_id: i32,
    ) -> Result<Option<(entity::user_asset::Model, Option<entity::asset_type::Model>)>, DbErr>
    {
        entity::prelude::UserAsset::find_by_id(asset_id)
            .filter(entity::user_asset::Column::UserId.eq(user_id))
            .find_also_related(entity::asset_type::Entity)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(entity::user_asset::Model, Option<entity::asset_type::Model>)>, DbErr> {
        entity::prelude::UserAsset::find()
            .filter(entity::user_asset::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_asset::Column::Id)
            .find_also_related(entity::asset_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn list_by_ids(
        &self,
        asset_ids: &[i32],
    ) -> Result<Vec<(entity::user_asset::Model, Option<entity::asset_type::Model>)>, DbErr> {
        if asset_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserAsset::find()
            .filter(entity::user_asset::Column::Id.is_in(asset_ids.iter().copied()))
            .order_by_asc(entity::user_asset::Column::Id)
            .find_also_related(entity::asset_type::Entity)
            .all(self.db)
            .await
    }

    /// Replaces every mutable field, returns `None` when the user owns no such asset
    pub async fn update(
        &self,
        asset_id: i32,
        user_id: i32,
        fields: AssetFields,
    ) -> Result<Option<entity::user_asset::Model>, DbErr> {
        let Some(asset) = entity::prelude::UserAsset::find_by_id(asset_id)
            .filter(entity::user_asset::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut asset_am = asset.into_active_model();
        asset_am.asset_type_id = ActiveValue::Set(fields.asset_type_id);
        asset_am.name = ActiveValue::Set(fields.name);
        asset_am.acquisition_date = ActiveValue::Set(fields.acquisition_date);
        asset_am.disposition_date = ActiveValue::Set(fields.disposition_date);
        asset_am.value = ActiveValue::Set(fields.value);
        asset_am.shared = ActiveValue::Set(fields.shared);

        Ok(Some(asset_am.update(self.db).await?))
    }

    /// Deletes an asset owned by the user
    ///
    /// Returns OK regardless of the asset existing, check [`DeleteResult::rows_affected`]
    /// to confirm the deletion.
    pub async fn delete(&self, asset_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserAsset::delete_many()
            .filter(entity::user_asset::Column::Id.eq(asset_id))
            .filter(entity::user_asset::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

pub struct AssetTaxRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AssetTaxRepository<'a, C> {
    /// Creates a new instance of [`AssetTaxRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        asset_id: i32,
        tax_id: i32,
        tax_value: Decimal,
    ) -> Result<entity::user_asset_tax::Model, DbErr> {
        let asset_tax = entity::user_asset_tax::ActiveModel {
            user_asset_id: ActiveValue::Set(asset_id),
            tax_id: ActiveValue::Set(tax_id),
            tax_value: ActiveValue::Set(tax_value),
            paid: ActiveValue::Set(false),
            ..Default::default()
        };

        asset_tax.insert(self.db).await
    }

    /// Tax rows for the given assets with the tax they apply
    pub async fn list_by_assets(
        &self,
        asset_ids: &[i32],
    ) -> Result<Vec<(entity::user_asset_tax::Model, Option<entity::tax::Model>)>, DbErr> {
        if asset_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserAssetTax::find()
            .filter(entity::user_asset_tax::Column::UserAssetId.is_in(asset_ids.iter().copied()))
            .order_by_asc(entity::user_asset_tax::Column::Id)
            .find_also_related(entity::tax::Entity)
            .all(self.db)
            .await
    }

    /// Tax rows applying the given tax, each with the asset it is charged on
    pub async fn list_by_tax(
        &self,
        tax_id: i32,
    ) -> Result<Vec<(entity::user_asset_tax::Model, Option<entity::user_asset::Model>)>, DbErr> {
        entity::prelude::UserAssetTax::find()
            .filter(entity::user_asset_tax::Column::TaxId.eq(tax_id))
            .order_by_asc(entity::user_asset_tax::Column::Id)
            .find_also_related(entity::user_asset::Entity)
            .all(self.db)
            .await
    }

    pub async fn set_tax_value(
        &self,
        asset_tax_id: i32,
        tax_value: Decimal,
    ) -> Result<UpdateResult, DbErr> {
        entity::prelude::UserAssetTax::update_many()
            .col_expr(entity::user_asset_tax::Column::TaxValue, Expr::value(tax_value))
            .filter(entity::user_asset_tax::Column::Id.eq(asset_tax_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_asset(&self, asset_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserAssetTax::delete_many()
            .filter(entity::user_asset_tax::Column::UserAssetId.eq(asset_id))
            .exec(self.db)
            .await
    }
}
