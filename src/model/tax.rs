use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::api::{IdValue, ReferenceDto};

/// Create and update payload for a tax
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TaxPayload {
    #[serde(rename = "TaxName")]
    pub name: String,
    #[serde(rename = "TaxPercentage")]
    pub percentage: String,
    #[serde(rename = "TaxPercentageRange")]
    pub percentage_range: String,
    #[serde(rename = "TaxApplicableCycle")]
    pub applicable_cycle: String,
    #[serde(rename = "TaxTypeID")]
    pub tax_type_id: Option<IdValue>,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TaxDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "TaxTypeID")]
    pub tax_type_id: i32,
    #[serde(rename = "TaxType")]
    pub tax_type: Option<ReferenceDto>,
    #[serde(rename = "TaxName")]
    pub name: String,
    #[serde(rename = "TaxPercentage")]
    pub percentage: Decimal,
    #[serde(rename = "TaxPercentageRange")]
    pub percentage_range: String,
    #[serde(rename = "TaxApplicableCycle")]
    pub applicable_cycle: String,
}
