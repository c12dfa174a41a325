use serde::{Deserialize, Serialize};

use crate::model::api::ReferenceDto;

/// Create payload for a lookup row or a user category
///
/// `model` is one of `assetType`, `incomeType`, `expenditureType`, `taxType`,
/// `groupType`, `fileType`, `currency`, `recurrency` or `userCategory`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CategoryPayload {
    pub model: String,
    pub name: String,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserCategoryDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
}

/// Every lookup table plus the caller's own categories
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesDto {
    pub asset_types: Vec<ReferenceDto>,
    pub income_types: Vec<ReferenceDto>,
    pub expenditure_types: Vec<ReferenceDto>,
    pub tax_types: Vec<ReferenceDto>,
    pub group_types: Vec<ReferenceDto>,
    pub file_types: Vec<ReferenceDto>,
    pub currencies: Vec<ReferenceDto>,
    pub recurrencies: Vec<ReferenceDto>,
    pub user_categories: Vec<UserCategoryDto>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryCreatedDto {
    pub message: String,
    pub model: String,
    pub category: ReferenceDto,
}
