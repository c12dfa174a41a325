use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::ReferenceDto,
        expense::{ExpenseDto, ExpensePayload},
    },
    server::{
        data::{
            expense::{ExpenseFields, ExpenseRepository},
            group::GroupItemRepository,
        },
        error::{
            resource::{map_unique_violation, ResourceError},
            validation::ValidationError,
            Error,
        },
        model::group_item::GroupItem,
        util::{
            date::{parse_date, parse_optional_date, parse_update_date},
            money::parse_amount,
            validation::{ensure_owner, require_filled, require_id},
        },
    },
};

pub struct ExpenseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExpenseService<'a> {
    /// Creates a new instance of [`ExpenseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<ExpenseDto>, Error> {
        let rows = ExpenseRepository::new(self.db).list_by_user(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(expense, expenditure_type)| expense_dto(expense, expenditure_type))
            .collect())
    }

    pub async fn get(&self, user_id: i32, expense_id: i32) -> Result<ExpenseDto, Error> {
        let (expense, expenditure_type) = ExpenseRepository::new(self.db)
            .find_owned(expense_id, user_id)
            .await?
            .ok_or_else(|| ResourceError::not_found("Expense not found"))?;

        Ok(expense_dto(expense, expenditure_type))
    }

    pub async fn create(
        &self,
        user_id: i32,
        payload: ExpensePayload,
    ) -> Result<ExpenseDto, Error> {
        let fields = parse_payload(&payload, false)?;
        ensure_owner(payload.user_id, user_id)?;

        let expense = ExpenseRepository::new(self.db)
            .create(user_id, fields)
            .await
            .map_err(duplicate_expense)?;

        tracing::debug!("Created expense {} for user {}", expense.id, user_id);

        self.get(user_id, expense.id).await
    }

    pub async fn update(
        &self,
        user_id: i32,
        expense_id: i32,
        payload: ExpensePayload,
    ) -> Result<ExpenseDto, Error> {
        let fields = parse_payload(&payload, true)?;

        ExpenseRepository::new(self.db)
            .update(expense_id, user_id, fields)
            .await
            .map_err(duplicate_expense)?
            .ok_or_else(|| ResourceError::not_found("Expense not found"))?;

        self.get(user_id, expense_id).await
    }

    /// Deletes the expense and its group links atomically.
    pub async fn delete(&self, user_id: i32, expense_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let expense_repo = ExpenseRepository::new(&txn);
        if expense_repo.find_owned(expense_id, user_id).await?.is_none() {
            return Ok(());
        }

        GroupItemRepository::new(&txn)
            .unlink_everywhere(GroupItem::Expense(expense_id))
            .await?;
        expense_repo.delete(expense_id, user_id).await?;

        txn.commit().await?;

        tracing::debug!("Deleted expense {} for user {}", expense_id, user_id);

        Ok(())
    }
}

fn parse_payload(
    payload: &ExpensePayload,
    for_update: bool,
) -> Result<ExpenseFields, ValidationError> {
    require_filled(&[
        &payload.name,
        &payload.value,
        &payload.recurrence,
        &payload.start_date,
    ])?;
    let expenditure_type_id = require_id(payload.expenditure_type_id.as_ref(), "ExpenditureTypeID")?;

    let value = parse_amount(&payload.value, "ExpenseValue")?;
    let start_date = if for_update {
        parse_update_date(&payload.start_date)?
    } else {
        parse_date(&payload.start_date)?
    };
    let end_date = parse_optional_date(payload.end_date.as_deref(), for_update)?;

    Ok(ExpenseFields {
        expenditure_type_id,
        name: payload.name.trim().to_string(),
        value,
        recurrence: payload.recurrence.trim().to_string(),
        start_date,
        end_date,
        shared: payload.shared.unwrap_or(false),
    })
}

fn duplicate_expense(err: sea_orm::DbErr) -> Error {
    map_unique_violation(
        err,
        "Expense name already exists",
        "An expense with this name already exists. Please choose a different name.",
    )
}

pub fn expense_dto(
    expense: entity::user_expense::Model,
    expenditure_type: Option<entity::expenditure_type::Model>,
) -> ExpenseDto {
    ExpenseDto {
        id: expense.id,
        user_id: expense.user_id,
        expenditure_type_id: expense.expenditure_type_id,
        expenditure_type: expenditure_type.map(|t| ReferenceDto::new(t.id, t.name)),
        name: expense.name,
        value: expense.value,
        recurrence: expense.recurrence,
        start_date: expense.start_date,
        end_date: expense.end_date,
        shared: expense.shared,
    }
}
