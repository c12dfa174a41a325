use rust_decimal::Decimal;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::fixture_date, TestSetup};

impl TestSetup {
    pub fn finance(&self) -> FinanceFixtures<'_> {
        FinanceFixtures { setup: self }
    }
}

pub struct FinanceFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> FinanceFixtures<'a> {
    pub async fn insert_tax(
        &self,
        user_id: i32,
        tax_type_id: i32,
        name: &str,
        percentage: Decimal,
    ) -> Result<entity::tax::Model, TestError> {
        Ok(entity::prelude::Tax::insert(entity::tax::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            tax_type_id: ActiveValue::Set(tax_type_id),
            name: ActiveValue::Set(name.to_string()),
            percentage: ActiveValue::Set(percentage),
            percentage_range: ActiveValue::Set("0-100".to_string()),
            applicable_cycle: ActiveValue::Set("Yearly".to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts an unshared `Apartment` asset.
    pub async fn insert_asset(
        &self,
        user_id: i32,
        name: &str,
        value: Decimal,
    ) -> Result<entity::user_asset::Model, TestError> {
        Ok(
            entity::prelude::UserAsset::insert(entity::user_asset::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                asset_type_id: ActiveValue::Set(1),
                name: ActiveValue::Set(name.to_string()),
                acquisition_date: ActiveValue::Set(fixture_date()),
                disposition_date: ActiveValue::Set(None),
                value: ActiveValue::Set(value),
                shared: ActiveValue::Set(false),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_asset_tax(
        &self,
        asset_id: i32,
        tax_id: i32,
        tax_value: Decimal,
    ) -> Result<entity::user_asset_tax::Model, TestError> {
        Ok(
            entity::prelude::UserAssetTax::insert(entity::user_asset_tax::ActiveModel {
                user_asset_id: ActiveValue::Set(asset_id),
                tax_id: ActiveValue::Set(tax_id),
                tax_value: ActiveValue::Set(tax_value),
                paid: ActiveValue::Set(false),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts a monthly `Salary` income owned entirely by the user.
    pub async fn insert_income(
        &self,
        user_id: i32,
        name: &str,
        value: Decimal,
        shared: bool,
    ) -> Result<entity::user_income::Model, TestError> {
        Ok(
            entity::prelude::UserIncome::insert(entity::user_income::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                income_type_id: ActiveValue::Set(1),
                name: ActiveValue::Set(name.to_string()),
                value: ActiveValue::Set(value),
                recurrence: ActiveValue::Set("Monthly".to_string()),
                start_date: ActiveValue::Set(fixture_date()),
                end_date: ActiveValue::Set(None),
                shared: ActiveValue::Set(shared),
                owning_percentage: ActiveValue::Set(Decimal::ONE_HUNDRED),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_income_tax(
        &self,
        income_id: i32,
        tax_id: i32,
        tax_value: Decimal,
    ) -> Result<entity::user_income_tax::Model, TestError> {
        Ok(
            entity::prelude::UserIncomeTax::insert(entity::user_income_tax::ActiveModel {
                user_income_id: ActiveValue::Set(income_id),
                tax_id: ActiveValue::Set(tax_id),
                tax_value: ActiveValue::Set(tax_value),
                paid: ActiveValue::Set(false),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts a monthly `General` expense.
    pub async fn insert_expense(
        &self,
        user_id: i32,
        name: &str,
        value: Decimal,
        shared: bool,
    ) -> Result<entity::user_expense::Model, TestError> {
        Ok(
            entity::prelude::UserExpense::insert(entity::user_expense::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                expenditure_type_id: ActiveValue::Set(1),
                name: ActiveValue::Set(name.to_string()),
                value: ActiveValue::Set(value),
                recurrence: ActiveValue::Set("Monthly".to_string()),
                start_date: ActiveValue::Set(fixture_date()),
                end_date: ActiveValue::Set(None),
                shared: ActiveValue::Set(shared),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_category(
        &self,
        user_id: i32,
        name: &str,
    ) -> Result<entity::user_category::Model, TestError> {
        Ok(
            entity::prelude::UserCategory::insert(entity::user_category::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                name: ActiveValue::Set(name.to_string()),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
