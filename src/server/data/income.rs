use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, UpdateResult,
};

/// Parsed income fields shared by create and update.
pub struct IncomeFields {
    pub income_type_id: i32,
    pub name: String,
    pub value: Decimal,
    pub recurrence: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub shared: bool,
    pub owning_percentage: Decimal,
}

type IncomeWithType = (entity::user_income::Model, Option<entity::income_type::Model>);

pub struct IncomeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IncomeRepository<'a, C> {
    /// Creates a new instance of [`IncomeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        fields: IncomeFields,
    ) -> Result<entity::user_income::Model, DbErr> {
        let income = entity::user_income::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            income_type_id: ActiveValue::Set(fields.income_type_id),
            name: ActiveValue::Set(fields.name),
            value: ActiveValue::Set(fields.value),
            recurrence: ActiveValue::Set(fields.recurrence),
            start_date: ActiveValue::Set(fields.start_date),
            end_date: ActiveValue::Set(fields.end_date),
            shared: ActiveValue::Set(fields.shared),
            owning_percentage: ActiveValue::Set(fields.owning_percentage),
            ..Default::default()
        };

        income.insert(self.db).await
    }

    pub async fn find_owned(
        &self,
        income_id: i32,
        user_id: i32,
    ) -> Result<Option<IncomeWithType>, DbErr> {
        entity::prelude::UserIncome::find_by_id(income_id)
            .filter(entity::user_income::Column::UserId.eq(user_id))
            .find_also_related(entity::income_type::Entity)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<IncomeWithType>, DbErr> {
        entity::prelude::UserIncome::find()
            .filter(entity::user_income::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_income::Column::Id)
            .find_also_related(entity::income_type::Entity)
            .all(self.db)
            .await
    }

    /// Incomes the user flagged as shared with groups
    pub async fn list_shared_by_user(&self, user_id: i32) -> Result<Vec<IncomeWithType>, DbErr> {
        entity::prelude::UserIncome::find()
            .filter(entity::user_income::Column::UserId.eq(user_id))
            .filter(entity::user_income::Column::Shared.eq(true))
            .order_by_asc(entity::user_income::Column::Id)
            .find_also_related(entity::income_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn list_by_ids(&self, income_ids: &[i32]) -> Result<Vec<IncomeWithType>, DbErr> {
        if income_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserIncome::find()
            .filter(entity::user_income::Column::Id.is_in(income_ids.iter().copied()))
            .order_by_asc(entity::user_income::Column::Id)
            .find_also_related(entity::income_type::Entity)
            .all(self.db)
            .await
    }

    /// Replaces every mutable field, returns `None` when the user owns no such income
    pub async fn update(
        &self,
        income_id: i32,
        user_id: i32,
        fields: IncomeFields,
    ) -> Result<Option<entity::user_income::Model>, DbErr> {
        let Some(income) = entity::prelude::UserIncome::find_by_id(income_id)
            .filter(entity::user_income::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut income_am = income.into_active_model();
        income_am.income_type_id = ActiveValue::Set(fields.income_type_id);
        income_am.name = ActiveValue::Set(fields.name);
        income_am.value = ActiveValue::Set(fields.value);
        income_am.recurrence = ActiveValue::Set(fields.recurrence);
        income_am.start_date = ActiveValue::Set(fields.start_date);
        income_am.end_date = ActiveValue::Set(fields.end_date);
        income_am.shared = ActiveValue::Set(fields.shared);
        income_am.owning_percentage = ActiveValue::Set(fields.owning_percentage);

        Ok(Some(income_am.update(self.db).await?))
    }

    pub async fn delete(&self, income_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserIncome::delete_many()
            .filter(entity::user_income::Column::Id.eq(income_id))
            .filter(entity::user_income::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

pub struct IncomeTaxRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IncomeTaxRepository<'a, C> {
    /// Creates a new instance of [`IncomeTaxRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        income_id: i32,
        tax_id: i32,
        tax_value: Decimal,
    ) -> Result<entity::user_income_tax::Model, DbErr> {
        let income_tax = entity::user_income_tax::ActiveModel {
            user_income_id: ActiveValue::Set(income_id),
            tax_id: ActiveValue::Set(tax_id),
            tax_value: ActiveValue::Set(tax_value),
            paid: ActiveValue::Set(false),
            ..Default::default()
        };

        income_tax.insert(self.db).await
    }

    pub async fn find_pair(
        &self,
        income_id: i32,
        tax_id: i32,
    ) -> Result<Option<entity::user_income_tax::Model>, DbErr> {
        entity::prelude::UserIncomeTax::find()
            .filter(entity::user_income_tax::Column::UserIncomeId.eq(income_id))
            .filter(entity::user_income_tax::Column::TaxId.eq(tax_id))
            .one(self.db)
            .await
    }

    pub async fn list_by_incomes(
        &self,
        income_ids: &[i32],
    ) -> Result<Vec<(entity::user_income_tax::Model, Option<entity::tax::Model>)>, DbErr> {
        if income_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserIncomeTax::find()
            .filter(
                entity::user_income_tax::Column::UserIncomeId.is_in(income_ids.iter().copied()),
            )
            .order_by_asc(entity::user_income_tax::Column::Id)
            .find_also_related(entity::tax::Entity)
            .all(self.db)
            .await
    }

    /// Tax rows applying the given tax, each with the income it is charged on
    pub async fn list_by_tax(
        &self,
        tax_id: i32,
    ) -> Result<Vec<(entity::user_income_tax::Model, Option<entity::user_income::Model>)>, DbErr>
    {
        entity::prelude::UserIncomeTax::find()
            .filter(entity::user_income_tax::Column::TaxId.eq(tax_id))
            .order_by_asc(entity::user_income_tax::Column::Id)
            .find_also_related(entity::user_income::Entity)
            .all(self.db)
            .await
    }

    pub async fn set_tax_value(
        &self,
        income_tax_id: i32,
        tax_value: Decimal,
    ) -> Result<UpdateResult, DbErr> {
        entity::prelude::UserIncomeTax::update_many()
            .col_expr(entity::user_income_tax::Column::TaxValue, Expr::value(tax_value))
            .filter(entity::user_income_tax::Column::Id.eq(income_tax_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_pair(&self, income_id: i32, tax_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserIncomeTax::delete_many()
            .filter(entity::user_income_tax::Column::UserIncomeId.eq(income_id))
            .filter(entity::user_income_tax::Column::TaxId.eq(tax_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_income(&self, income_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserIncomeTax::delete_many()
            .filter(entity::user_income_tax::Column::UserIncomeId.eq(income_id))
            .exec(self.db)
            .await
    }
}
