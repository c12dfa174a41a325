use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct TaxFields {
    pub tax_type_id: i32,
    pub name: String,
    pub percentage: Decimal,
    pub percentage_range: String,
    pub applicable_cycle: String,
}

type TaxWithType = (entity::tax::Model, Option<entity::tax_type::Model>);

pub struct TaxRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TaxRepository<'a, C> {
    /// Creates a new instance of [`TaxRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, fields: TaxFields) -> Result<entity::tax::Model, DbErr> {
        let tax = entity::tax::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            tax_type_id: ActiveValue::Set(fields.tax_type_id),
            name: ActiveValue::Set(fields.name),
            percentage: ActiveValue::Set(fields.percentage),
            percentage_range: ActiveValue::Set(fields.percentage_range),
            applicable_cycle: ActiveValue::Set(fields.applicable_cycle),
            ..Default::default()
        };

        tax.insert(self.db).await
    }

    /// Finds a tax owned by the user together with its type
    pub async fn find_owned(&self, tax_id: i32, user_id: i32) -> Result<Option<TaxWithType>, DbErr> {
        entity::prelude::Tax::find_by_id(tax_id)
            .filter(entity::tax::Column::UserId.eq(user_id))
            .find_also_related(entity::tax_type::Entity)
            .one(self.db)
            .await
    }

    /// Taxes among `tax_ids` that the user owns, ids the user does not own are skipped
    pub async fn find_owned_many(
        &self,
        tax_ids: &[i32],
        user_id: i32,
    ) -> Result<Vec<entity::tax::Model>, DbErr> {
        if tax_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Tax::find()
            .filter(entity::tax::Column::Id.is_in(tax_ids.iter().copied()))
            .filter(entity::tax::Column::UserId.eq(user_id))
            .all(self.db)
            .await
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<TaxWithType>, DbErr> {
        entity::prelude::Tax::find()
            .filter(entity::tax::Column::UserId.eq(user_id))
            .order_by_asc(entity::tax::Column::Id)
            .find_also_related(entity::tax_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        tax_id: i32,
        user_id: i32,
        fields: TaxFields,
    ) -> Result<Option<entity::tax::Model>, DbErr> {
        let Some(tax) = entity::prelude::Tax::find_by_id(tax_id)
            .filter(entity::tax::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut tax_am = tax.into_active_model();
        tax_am.tax_type_id = ActiveValue::Set(fields.tax_type_id);
        tax_am.name = ActiveValue::Set(fields.name);
        tax_am.percentage = ActiveValue::Set(fields.percentage);
        tax_am.percentage_range = ActiveValue::Set(fields.percentage_range);
        tax_am.applicable_cycle = ActiveValue::Set(fields.applicable_cycle);

        Ok(Some(tax_am.update(self.db).await?))
    }

    pub async fn delete(&self, tax_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Tax::delete_many()
            .filter(entity::tax::Column::Id.eq(tax_id))
            .filter(entity::tax::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
