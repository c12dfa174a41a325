use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::api::{IdValue, ReferenceDto};

/// Create and update payload for an expense
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ExpensePayload {
    #[serde(rename = "ExpenseName")]
    pub name: String,
    #[serde(rename = "ExpenseValue")]
    pub value: String,
    #[serde(rename = "ExpenditureTypeID")]
    pub expenditure_type_id: Option<IdValue>,
    #[serde(rename = "ExpenseRecurrence")]
    pub recurrence: String,
    #[serde(rename = "ExpenseStartDate")]
    pub start_date: String,
    #[serde(rename = "ExpenseEndDate")]
    pub end_date: Option<String>,
    #[serde(rename = "SharedExpense")]
    pub shared: Option<bool>,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ExpenseDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "ExpenditureTypeID")]
    pub expenditure_type_id: i32,
    #[serde(rename = "ExpenditureType")]
    pub expenditure_type: Option<ReferenceDto>,
    #[serde(rename = "ExpenseName")]
    pub name: String,
    #[serde(rename = "ExpenseValue")]
    pub value: Decimal,
    #[serde(rename = "ExpenseRecurrence")]
    pub recurrence: String,
    #[serde(rename = "ExpenseStartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "ExpenseEndDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "SharedExpense")]
    pub shared: bool,
}
