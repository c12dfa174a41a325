use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::api::{IdValue, ReferenceDto};

/// Reference to a tax row to apply to an asset
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TaxRefDto {
    #[serde(rename = "TaxID")]
    pub tax_id: i32,
}

/// Create and update payload for an asset
///
/// `AssetValue` is a decimal string, `AssetTypeID` may be a number or a string.
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct AssetPayload {
    #[serde(rename = "AssetName")]
    pub name: String,
    #[serde(rename = "AssetValue")]
    pub value: String,
    #[serde(rename = "AssetTypeID")]
    pub asset_type_id: Option<IdValue>,
    #[serde(rename = "AssetAquisitionDate")]
    pub acquisition_date: String,
    #[serde(rename = "AssetDispositionDate")]
    pub disposition_date: Option<String>,
    #[serde(rename = "SharedAsset")]
    pub shared: Option<bool>,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
    #[serde(rename = "UserAssetTaxes")]
    pub taxes: Vec<TaxRefDto>,
}

/// A tax applied to a financial item together with its computed value
#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ItemTaxDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "TaxID")]
    pub tax_id: i32,
    #[serde(rename = "TaxName")]
    pub tax_name: Option<String>,
    #[serde(rename = "TaxValue")]
    pub tax_value: Decimal,
    #[serde(rename = "Paid")]
    pub paid: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AssetDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "AssetTypeID")]
    pub asset_type_id: i32,
    #[serde(rename = "AssetType")]
    pub asset_type: Option<ReferenceDto>,
    #[serde(rename = "AssetName")]
    pub name: String,
    #[serde(rename = "AssetAquisitionDate")]
    pub acquisition_date: NaiveDate,
    #[serde(rename = "AssetDispositionDate")]
    pub disposition_date: Option<NaiveDate>,
    #[serde(rename = "AssetValue")]
    pub value: Decimal,
    #[serde(rename = "SharedAsset")]
    pub shared: bool,
    #[serde(rename = "UserAssetTaxes")]
    pub taxes: Vec<ItemTaxDto>,
}
