use serde::{Deserialize, Serialize};

use crate::model::{
    api::{IdValue, ReferenceDto},
    asset::AssetDto,
    expense::ExpenseDto,
    income::IncomeDto,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct GroupPayload {
    #[serde(rename = "GroupName")]
    pub name: String,
    #[serde(rename = "GroupTypeID")]
    pub group_type_id: Option<IdValue>,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i32,
}

/// Shared item to attach, encoded as `income_<id>`, `expense_<id>` or `asset_<id>`
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct GroupItemPayload {
    #[serde(rename = "GroupItemSelected", alias = "item")]
    pub item: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct GroupInvitePayload {
    #[serde(rename = "InviteEmail")]
    pub invite_email: String,
}

/// Group row without its members or items
#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroupSummaryDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "GroupTypeID")]
    pub group_type_id: i32,
    #[serde(rename = "GroupName")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroupMemberDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: i32,
    #[serde(rename = "UserRole")]
    pub role: Option<ReferenceDto>,
    #[serde(rename = "Active")]
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroupInviteDto {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "InviteEmail")]
    pub invite_email: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroupDto {
    #[serde(flatten)]
    pub group: GroupSummaryDto,
    #[serde(rename = "GroupType")]
    pub group_type: Option<ReferenceDto>,
    #[serde(rename = "GroupMembers")]
    pub members: Vec<GroupMemberDto>,
    #[serde(rename = "GroupInvites")]
    pub invites: Vec<GroupInviteDto>,
    #[serde(rename = "UserGroupIncomes")]
    pub incomes: Vec<IncomeDto>,
    #[serde(rename = "UserGroupExpenditures")]
    pub expenses: Vec<ExpenseDto>,
    #[serde(rename = "UserGroupAssets")]
    pub assets: Vec<AssetDto>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupListDto {
    pub groups: Vec<GroupDto>,
    pub shared_incomes: Vec<IncomeDto>,
    pub shared_expenses: Vec<ExpenseDto>,
    pub group_types: Vec<ReferenceDto>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroupCreatedDto {
    pub message: String,
    pub group: GroupSummaryDto,
}
