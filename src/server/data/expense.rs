use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Parsed expense fields shared by create and update.
pub struct ExpenseFields {
    pub expenditure_type_id: i32,
    pub name: String,
    pub value: Decimal,
    pub recurrence: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub shared: bool,
}

type ExpenseWithType = (
    entity::user_expense::Model,
    Option<entity::expenditure_type::Model>,
);

pub struct ExpenseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ExpenseRepository<'a, C> {
    /// Creates a new instance of [`ExpenseRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        fields: ExpenseFields,
    ) -> Result<entity::user_expense::Model, DbErr> {
        let expense = entity::user_expense::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            expenditure_type_id: ActiveValue::Set(fields.expenditure_type_id),
            name: ActiveValue::Set(fields.name),
            value: ActiveValue::Set(fields.value),
            recurrence: ActiveValue::Set(fields.recurrence),
            start_date: ActiveValue::Set(fields.start_date),
            end_date: ActiveValue::Set(fields.end_date),
            shared: ActiveValue::Set(fields.shared),
            ..Default::default()
        };

        expense.insert(self.db).await
    }

    pub async fn find_owned(
        &self,
        expense_id: i32,
        user_id: i32,
    ) -> Result<Option<ExpenseWithType>, DbErr> {
        entity::prelude::UserExpense::find_by_id(expense_id)
            .filter(entity::user_expense::Column::UserId.eq(user_id))
            .find_also_related(entity::expenditure_type::Entity)
            .one(self.db)
            .await
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<ExpenseWithType>, DbErr> {
        entity::prelude::UserExpense::find()
            .filter(entity::user_expense::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_expense::Column::Id)
            .find_also_related(entity::expenditure_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn list_shared_by_user(&self, user_id: i32) -> Result<Vec<ExpenseWithType>, DbErr> {
        entity::prelude::UserExpense::find()
            .filter(entity::user_expense::Column::UserId.eq(user_id))
            .filter(entity::user_expense::Column::Shared.eq(true))
            .order_by_asc(entity::user_expense::Column::Id)
            .find_also_related(entity::expenditure_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn list_by_ids(&self, expense_ids: &[i32]) -> Result<Vec<ExpenseWithType>, DbErr> {
        if expense_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::UserExpense::find()
            .filter(entity::user_expense::Column::Id.is_in(expense_ids.iter().copied()))
            .order_by_asc(entity::user_expense::Column::Id)
            .find_also_related(entity::expenditure_type::Entity)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        expense_id: i32,
        user_id: i32,
        fields: ExpenseFields,
    ) -> Result<Option<entity::user_expense::Model>, DbErr> {
        let Some(expense) = entity::prelude::UserExpense::find_by_id(expense_id)
            .filter(entity::user_expense::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut expense_am = expense.into_active_model();
        expense_am.expenditure_type_id = ActiveValue::Set(fields.expenditure_type_id);
        expense_am.name = ActiveValue::Set(fields.name);
        expense_am.value = ActiveValue::Set(fields.value);
        expense_am.recurrence = ActiveValue::Set(fields.recurrence);
        expense_am.start_date = ActiveValue::Set(fields.start_date);
        expense_am.end_date = ActiveValue::Set(fields.end_date);
        expense_am.shared = ActiveValue::Set(fields.shared);

        Ok(Some(expense_am.update(self.db).await?))
    }

    pub async fn delete(&self, expense_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserExpense::delete_many()
            .filter(entity::user_expense::Column::Id.eq(expense_id))
            .filter(entity::user_expense::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
