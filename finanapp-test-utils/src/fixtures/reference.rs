use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn reference(&self) -> ReferenceFixtures<'_> {
        ReferenceFixtures { setup: self }
    }
}

pub struct ReferenceFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> ReferenceFixtures<'a> {
    /// Inserts the lookup rows written by the seed pass, in the same order so
    /// ids line up (`user` type is 2, `Viewer` role is 3, `Income` tax type is 2).
    pub async fn insert_defaults(&self) -> Result<(), TestError> {
        let db = &self.setup.db;

        entity::prelude::UserType::insert_many(["admin", "user"].map(|name| {
            entity::user_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::UserRole::insert_many(
            [("Advance", true), ("Basic", true), ("Viewer", false)].map(
                |(name, view_permission)| entity::user_role::ActiveModel {
                    name: ActiveValue::Set(name.to_string()),
                    view_permission: ActiveValue::Set(view_permission),
                    ..Default::default()
                },
            ),
        )
        .exec(db)
        .await?;

        entity::prelude::AssetType::insert_many(["Apartment", "Car"].map(|name| {
            entity::asset_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::IncomeType::insert_many(["Salary", "Investments"].map(|name| {
            entity::income_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::ExpenditureType::insert_many(["General", "HomeCare"].map(|name| {
            entity::expenditure_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::TaxType::insert_many(["Asset", "Income"].map(|name| {
            entity::tax_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::GroupType::insert_many(["Family", "Business"].map(|name| {
            entity::group_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::FileType::insert_many(["Receipt", "Contract"].map(|name| {
            entity::file_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::Currency::insert_many(["BRL", "USD", "EUR"].map(|name| {
            entity::currency::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        entity::prelude::Recurrency::insert_many(["Monthly", "Yearly"].map(|name| {
            entity::recurrency::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
        }))
        .exec(db)
        .await?;

        Ok(())
    }
}
