use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::ReferenceDto,
        asset::ItemTaxDto,
        tax::{TaxDto, TaxPayload},
    },
    server::{
        data::{
            asset::AssetTaxRepository,
            income::IncomeTaxRepository,
            tax::{TaxFields, TaxRepository},
        },
        error::{
            resource::{map_foreign_key_violation, map_unique_violation, ResourceError},
            validation::ValidationError,
            Error,
        },
        util::{
            money::{parse_amount, tax_value},
            validation::{ensure_owner, require_filled, require_id},
        },
    },
};

pub struct TaxService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxService<'a> {
    /// Creates a new instance of [`TaxService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<TaxDto>, Error> {
        let rows = TaxRepository::new(self.db).list_by_user(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(tax, tax_type)| tax_dto(tax, tax_type))
            .collect())
    }

    pub async fn create(&self, user_id: i32, payload: TaxPayload) -> Result<TaxDto, Error> {
        let fields = parse_payload(&payload)?;
        ensure_owner(payload.user_id, user_id)?;

        let tax_repo = TaxRepository::new(self.db);
        let tax = tax_repo.create(user_id, fields).await.map_err(|e| {
            map_unique_violation(
                e,
                "Tax name already exists",
                "A tax with this name and type already exists. Please choose a different name.",
            )
        })?;

        tracing::debug!("Created tax {} for user {}", tax.id, user_id);

        self.get(user_id, tax.id).await
    }

    pub async fn update(
        &self,
        user_id: i32,
        tax_id: i32,
        payload: TaxPayload,
    ) -> Result<TaxDto, Error> {
        let fields = parse_payload(&payload)?;

        let txn = self.db.begin().await?;

        let tax = TaxRepository::new(&txn)
            .update(tax_id, user_id, fields)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    "Tax name already exists",
                    "A tax with this name and type already exists. Please choose a different name.",
                )
            })?
            .ok_or_else(|| ResourceError::not_found("Tax not found"))?;

        let asset_tax_repo = AssetTaxRepository::new(&txn);
        for (asset_tax, asset) in asset_tax_repo.list_by_tax(tax.id).await? {
            if let Some(asset) = asset {
                asset_tax_repo
                    .set_tax_value(asset_tax.id, tax_value(asset.value, tax.percentage))
                    .await?;
            }
        }

        let income_tax_repo = IncomeTaxRepository::new(&txn);
        for (income_tax, income) in income_tax_repo.list_by_tax(tax.id).await? {
            if let Some(income) = income {
                income_tax_repo
                    .set_tax_value(income_tax.id, tax_value(income.value, tax.percentage))
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::debug!("Updated tax {} for user {}", tax.id, user_id);

        self.get(user_id, tax_id).await
    }

    /// Idempotent; rejected with 409 while the tax is still applied to an asset or income
    pub async fn delete(&self, user_id: i32, tax_id: i32) -> Result<(), Error> {
        let tax_repo = TaxRepository::new(self.db);

        let result = tax_repo.delete(tax_id, user_id).await.map_err(|e| {
            map_foreign_key_violation(
                e,
                "tax",
                "You must remove the tax from its assets and incomes before deleting it",
            )
        })?;

        tracing::debug!(
            "Deleted tax {} for user {} ({} rows)",
            tax_id,
            user_id,
            result.rows_affected
        );

        Ok(())
    }

    async fn get(&self, user_id: i32, tax_id: i32) -> Result<TaxDto, Error> {
        let (tax, tax_type) = TaxRepository::new(self.db)
            .find_owned(tax_id, user_id)
            .await?
            .ok_or_else(|| Error::InternalError(format!("Tax {} vanished after write", tax_id)))?;

        Ok(tax_dto(tax, tax_type))
    }
}

fn parse_payload(payload: &TaxPayload) -> Result<TaxFields, ValidationError> {
    require_filled(&[&payload.name, &payload.percentage])?;
    let tax_type_id = require_id(payload.tax_type_id.as_ref(), "TaxTypeID")?;

    let percentage = parse_amount(&payload.percentage, "TaxPercentage")?;
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(ValidationError::InvalidNumber("TaxPercentage"));
    }

    Ok(TaxFields {
        tax_type_id,
        name: payload.name.trim().to_string(),
        percentage,
        percentage_range: payload.percentage_range.trim().to_string(),
        applicable_cycle: payload.applicable_cycle.trim().to_string(),
    })
}

pub fn tax_dto(tax: entity::tax::Model, tax_type: Option<entity::tax_type::Model>) -> TaxDto {
    TaxDto {
        id: tax.id,
        user_id: tax.user_id,
        tax_type_id: tax.tax_type_id,
        tax_type: tax_type.map(|t| ReferenceDto::new(t.id, t.name)),
        name: tax.name,
        percentage: tax.percentage,
        percentage_range: tax.percentage_range,
        applicable_cycle: tax.applicable_cycle,
    }
}

/// Join row between a financial item and a tax, with the tax name when loaded.
pub fn item_tax_dto(
    id: i32,
    tax_id: i32,
    tax_value: Decimal,
    paid: bool,
    tax: Option<entity::tax::Model>,
) -> ItemTaxDto {
    ItemTaxDto {
        id,
        tax_id,
        tax_name: tax.map(|t| t.name),
        tax_value,
        paid,
    }
}
