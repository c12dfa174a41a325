use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::{
    api::ReferenceDto, asset::AssetDto, expense::ExpenseDto, group::GroupSummaryDto,
    income::IncomeDto, tax::TaxDto,
};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            date_of_birth: user.date_of_birth,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// Everything the dashboard page shows for the signed-in user
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub user: UserDto,
    pub assets: Vec<AssetDto>,
    pub incomes: Vec<IncomeDto>,
    pub expenses: Vec<ExpenseDto>,
    pub taxes: Vec<TaxDto>,
    pub groups: Vec<GroupSummaryDto>,
    pub asset_types: Vec<ReferenceDto>,
}

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdateDto {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdatedDto {
    pub status: String,
    pub message: String,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
}
