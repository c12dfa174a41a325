use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::group_item::GroupItem;

pub struct GroupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    /// Creates a new instance of [`GroupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        group_type_id: i32,
        name: &str,
    ) -> Result<entity::user_group::Model, DbErr> {
        let group = entity::user_group::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            group_type_id: ActiveValue::Set(group_type_id),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };

        group.insert(self.db).await
    }

    pub async fn find_owned(
        &self,
        group_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::user_group::Model>, DbErr> {
        entity::prelude::UserGroup::find_by_id(group_id)
            .filter(entity::user_group::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(entity::user_group::Model, Option<entity::group_type::Model>)>, DbErr> {
        entity::prelude::UserGroup::find()
            .filter(entity::user_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_group::Column::Id)
            .find_also_related(entity::group_type::Entity)
            .all(self.db)
            .await
    }

    /// Fails with a foreign key violation while shared items are still attached
    pub async fn delete(&self, group_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserGroup::delete_by_id(group_id)
            .exec(self.db)
            .await
    }
}

pub struct GroupMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupMemberRepository<'a, C> {
    /// Creates a new instance of [`GroupMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        group_id: i32,
        user_id: i32,
        user_role_id: i32,
        active: bool,
    ) -> Result<entity::group_member::Model, DbErr> {
        let member = entity::group_member::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            user_id: ActiveValue::Set(user_id),
            user_role_id: ActiveValue::Set(user_role_id),
            active: ActiveValue::Set(active),
            ..Default::default()
        };

        member.insert(self.db).await
    }

    pub async fn list_by_groups(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<(entity::group_member::Model, Option<entity::user_role::Model>)>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.is_in(group_ids.iter().copied()))
            .order_by_asc(entity::group_member::Column::Id)
            .find_also_related(entity::user_role::Entity)
            .all(self.db)
            .await
    }

    pub async fn delete_by_group(&self, group_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::GroupMember::delete_many()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await
    }
}

pub struct GroupInviteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupInviteRepository<'a, C> {
    /// Creates a new instance of [`GroupInviteRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        group_id: i32,
        invite_email: &str,
    ) -> Result<entity::group_invite::Model, DbErr> {
        let invite = entity::group_invite::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            invite_email: ActiveValue::Set(invite_email.to_string()),
            ..Default::default()
        };

        invite.insert(self.db).await
    }

    pub async fn list_by_groups(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<entity::group_invite::Model>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::GroupInvite::find()
            .filter(entity::group_invite::Column::GroupId.is_in(group_ids.iter().copied()))
            .order_by_asc(entity::group_invite::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete_by_group(&self, group_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::GroupInvite::delete_many()
            .filter(entity::group_invite::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await
    }
}

/// Links between groups and the shared incomes, expenses and assets attached to them.
pub struct GroupItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupItemRepository<'a, C> {
    /// Creates a new instance of [`GroupItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Attaches the item to the group, assets are linked at full ownership
    pub async fn link(&self, group_id: i32, item: GroupItem) -> Result<(), DbErr> {
        match item {
            GroupItem::Income(income_id) => {
                entity::group_income::ActiveModel {
                    group_id: ActiveValue::Set(group_id),
                    user_income_id: ActiveValue::Set(income_id),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
            GroupItem::Expense(expense_id) => {
                entity::group_expense::ActiveModel {
                    group_id: ActiveValue::Set(group_id),
                    user_expense_id: ActiveValue::Set(expense_id),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
            GroupItem::Asset(asset_id) => {
                entity::group_asset::ActiveModel {
                    group_id: ActiveValue::Set(group_id),
                    user_asset_id: ActiveValue::Set(asset_id),
                    owning_percentage: ActiveValue::Set(Decimal::ONE_HUNDRED),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    pub async fn unlink(&self, group_id: i32, item: GroupItem) -> Result<DeleteResult, DbErr> {
        match item {
            GroupItem::Income(income_id) => {
                entity::prelude::GroupIncome::delete_many()
                    .filter(entity::group_income::Column::GroupId.eq(group_id))
                    .filter(entity::group_income::Column::UserIncomeId.eq(income_id))
                    .exec(self.db)
                    .await
            }
            GroupItem::Expense(expense_id) => {
                entity::prelude::GroupExpense::delete_many()
                    .filter(entity::group_expense::Column::GroupId.eq(group_id))
                    .filter(entity::group_expense::Column::UserExpenseId.eq(expense_id))
                    .exec(self.db)
                    .await
            }
            GroupItem::Asset(asset_id) => {
                entity::prelude::GroupAsset::delete_many()
                    .filter(entity::group_asset::Column::GroupId.eq(group_id))
                    .filter(entity::group_asset::Column::UserAssetId.eq(asset_id))
                    .exec(self.db)
                    .await
            }
        }
    }

    /// Removes the item from every group it is attached to
    pub async fn unlink_everywhere(&self, item: GroupItem) -> Result<DeleteResult, DbErr> {
        match item {
            GroupItem::Income(income_id) => {
                entity::prelude::GroupIncome::delete_many()
                    .filter(entity::group_income::Column::UserIncomeId.eq(income_id))
                    .exec(self.db)
                    .await
            }
            GroupItem::Expense(expense_id) => {
                entity::prelude::GroupExpense::delete_many()
                    .filter(entity::group_expense::Column::UserExpenseId.eq(expense_id))
                    .exec(self.db)
                    .await
            }
            GroupItem::Asset(asset_id) => {
                entity::prelude::GroupAsset::delete_many()
                    .filter(entity::group_asset::Column::UserAssetId.eq(asset_id))
                    .exec(self.db)
                    .await
            }
        }
    }

    pub async fn list_income_links(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<entity::group_income::Model>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::GroupIncome::find()
            .filter(entity::group_income::Column::GroupId.is_in(group_ids.iter().copied()))
            .order_by_asc(entity::group_income::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_asset_links(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<entity::group_asset::Model>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::GroupAsset::find()
            .filter(entity::group_asset::Column::GroupId.is_in(group_ids.iter().copied()))
            .order_by_asc(entity::group_asset::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_expense_links(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<entity::group_expense::Model>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::GroupExpense::find()
            .filter(entity::group_expense::Column::GroupId.is_in(group_ids.iter().copied()))
            .order_by_asc(entity::group_expense::Column::Id)
            .all(self.db)
            .await
    }
}
