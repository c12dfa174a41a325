use rust_decimal::Decimal;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn group(&self) -> GroupFixtures<'_> {
        GroupFixtures { setup: self }
    }
}

pub struct GroupFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> GroupFixtures<'a> {
    /// Inserts a `Family` group owned by the user.
    pub async fn insert_group(
        &self,
        owner_id: i32,
        name: &str,
    ) -> Result<entity::user_group::Model, TestError> {
        Ok(
            entity::prelude::UserGroup::insert(entity::user_group::ActiveModel {
                user_id: ActiveValue::Set(owner_id),
                group_type_id: ActiveValue::Set(1),
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_member(
        &self,
        group_id: i32,
        user_id: i32,
        user_role_id: i32,
        active: bool,
    ) -> Result<entity::group_member::Model, TestError> {
        Ok(
            entity::prelude::GroupMember::insert(entity::group_member::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                user_id: ActiveValue::Set(user_id),
                user_role_id: ActiveValue::Set(user_role_id),
                active: ActiveValue::Set(active),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_invite(
        &self,
        group_id: i32,
        email: &str,
    ) -> Result<entity::group_invite::Model, TestError> {
        Ok(
            entity::prelude::GroupInvite::insert(entity::group_invite::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                invite_email: ActiveValue::Set(email.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn link_income(
        &self,
        group_id: i32,
        income_id: i32,
    ) -> Result<entity::group_income::Model, TestError> {
        Ok(
            entity::prelude::GroupIncome::insert(entity::group_income::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                user_income_id: ActiveValue::Set(income_id),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn link_expense(
        &self,
        group_id: i32,
        expense_id: i32,
    ) -> Result<entity::group_expense::Model, TestError> {
        Ok(
            entity::prelude::GroupExpense::insert(entity::group_expense::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                user_expense_id: ActiveValue::Set(expense_id),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn link_asset(
        &self,
        group_id: i32,
        asset_id: i32,
    ) -> Result<entity::group_asset::Model, TestError> {
        Ok(
            entity::prelude::GroupAsset::insert(entity::group_asset::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                user_asset_id: ActiveValue::Set(asset_id),
                owning_percentage: ActiveValue::Set(Decimal::ONE_HUNDRED),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
