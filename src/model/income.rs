use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{
    api::{IdValue, ReferenceDto},
    asset::ItemTaxDto,
};

/// Create and update payload for an income
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct IncomePayload {
    #[serde(rename = "IncomeName")]
    pub name: String,
    #[serde(rename = "IncomeValue")]
    pub value: String,
    #[serde(rename = "IncomeTypeID")]
    pub income_type_id: Option<IdValue>,
    #[serde(rename = "IncomeRecurrence")]
    pub recurrence: String,
    #[serde(rename = "IncomeStartDate")]
    pub start_date: String,
    #[serde(rename = "IncomeEndDate")]
    pub end_date: Option<String>,
    #[serde(rename = "SharedIncome")]
    pub shared: Option<bool>,
    /// Decimal string, defaults to 100
    #[serde(rename = "OwningPercentage")]
    pub owning_percentage: Option<String>,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IncomeDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "IncomeTypeID")]
    pub income_type_id: i32,
    #[serde(rename = "IncomeType")]
    pub income_type: Option<ReferenceDto>,
    #[serde(rename = "IncomeName")]
    pub name: String,
    #[serde(rename = "IncomeValue")]
    pub value: Decimal,
    #[serde(rename = "IncomeRecurrence")]
    pub recurrence: String,
    #[serde(rename = "IncomeStartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "IncomeEndDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "SharedIncome")]
    pub shared: bool,
    #[serde(rename = "OwningPercentage")]
    pub owning_percentage: Decimal,
    #[serde(rename = "UserIncomeTaxes")]
    pub taxes: Vec<ItemTaxDto>,
}

/// Tax to attach to an income
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct IncomeTaxPayload {
    #[serde(rename = "TaxID")]
    pub tax_id: Option<IdValue>,
}
