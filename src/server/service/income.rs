use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::ReferenceDto,
        asset::ItemTaxDto,
        income::{IncomeDto, IncomePayload, IncomeTaxPayload},
    },
    server::{
        data::{
            group::GroupItemRepository,
            income::{IncomeFields, IncomeRepository, IncomeTaxRepository},
            tax::TaxRepository,
        },
        error::{
            resource::{map_unique_violation, ResourceError},
            validation::ValidationError,
            Error,
        },
        model::{group_item::GroupItem, procedure::ProcedureResult},
        service::tax::item_tax_dto,
        util::{
            date::{parse_date, parse_optional_date, parse_update_date},
            money::{parse_amount, tax_value},
            validation::{ensure_owner, require_filled, require_id},
        },
    },
};

/// Taxes of this type are the only ones that may be attached to an income.
const INCOME_TAX_TYPE: &str = "Income";

type IncomeWithType = (entity::user_income::Model, Option<entity::income_type::Model>);

pub struct IncomeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IncomeService<'a> {
    /// Creates a new instance of [`IncomeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<IncomeDto>, Error> {
        let rows = IncomeRepository::new(self.db).list_by_user(user_id).await?;

        with_taxes(self.db, rows).await
    }

    pub async fn get(&self, user_id: i32, income_id: i32) -> Result<IncomeDto, Error> {
        let row = IncomeRepository::new(self.db)
            .find_owned(income_id, user_id)
            .await?
            .ok_or_else(|| ResourceError::not_found("Income not found"))?;

        with_taxes(self.db, vec![row])
            .await?
            .pop()
            .ok_or_else(|| Error::InternalError(format!("Income {} lost its row", income_id)))
    }

    pub async fn create(&self, user_id: i32, payload: IncomePayload) -> Result<IncomeDto, Error> {
        let fields = parse_payload(&payload, false)?;
        ensure_owner(payload.user_id, user_id)?;

        let income = IncomeRepository::new(self.db)
            .create(user_id, fields)
            .await
            .map_err(duplicate_income)?;

        tracing::debug!("Created income {} for user {}", income.id, user_id);

        self.get(user_id, income.id).await
    }

    pub async fn update(
        &self,
        user_id: i32,
        income_id: i32,
        payload: IncomePayload,
    ) -> Result<IncomeDto, Error> {
        let fields = parse_payload(&payload, true)?;

        let txn = self.db.begin().await?;

        let income = IncomeRepository::new(&txn)
            .update(income_id, user_id, fields)
            .await
            .map_err(duplicate_income)?
            .ok_or_else(|| ResourceError::not_found("Income not found"))?;

        let income_tax_repo = IncomeTaxRepository::new(&txn);
        for (income_tax, tax) in income_tax_repo.list_by_incomes(&[income.id]).await? {
            if let Some(tax) = tax {
                income_tax_repo
                    .set_tax_value(income_tax.id, tax_value(income.value, tax.percentage))
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::debug!("Updated income {} for user {}", income.id, user_id);

        self.get(user_id, income_id).await
    }

    /// Deletes the income, its tax rows and its group links atomically.
    pub async fn delete(&self, user_id: i32, income_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let income_repo = IncomeRepository::new(&txn);
        if income_repo.find_owned(income_id, user_id).await?.is_none() {
            return Ok(());
        }

        IncomeTaxRepository::new(&txn)
            .delete_by_income(income_id)
            .await?;
        GroupItemRepository::new(&txn)
            .unlink_everywhere(GroupItem::Income(income_id))
            .await?;
        income_repo.delete(income_id, user_id).await?;

        txn.commit().await?;

        tracing::debug!("Deleted income {} for user {}", income_id, user_id);

        Ok(())
    }

    /// Attaches one of the user's `Income` taxes to one of their incomes.
    ///
    /// Business-rule failures are reported as a failed [`ProcedureResult`] rather than an
    /// error, so the caller can answer 400 with the reason.
    pub async fn attach_tax(
        &self,
        user_id: i32,
        income_id: i32,
        payload: IncomeTaxPayload,
    ) -> Result<ProcedureResult, Error> {
        let tax_id = require_id(payload.tax_id.as_ref(), "TaxID")?;

        let txn = self.db.begin().await?;

        let Some((income, _)) = IncomeRepository::new(&txn)
            .find_owned(income_id, user_id)
            .await?
        else {
            return Ok(ProcedureResult::fail("Income not found for this user"));
        };

        let Some((tax, tax_type)) = TaxRepository::new(&txn).find_owned(tax_id, user_id).await?
        else {
            return Ok(ProcedureResult::fail("Tax not found for this user"));
        };

        if tax_type.map(|t| t.name).as_deref() != Some(INCOME_TAX_TYPE) {
            return Ok(ProcedureResult::fail("Tax type is not applicable to incomes"));
        }

        let income_tax_repo = IncomeTaxRepository::new(&txn);
        if income_tax_repo.find_pair(income.id, tax.id).await?.is_some() {
            return Ok(ProcedureResult::fail("Tax is already applied to this income"));
        }

        income_tax_repo
            .create(income.id, tax.id, tax_value(income.value, tax.percentage))
            .await?;

        txn.commit().await?;

        tracing::debug!("Attached tax {} to income {}", tax.id, income.id);

        Ok(ProcedureResult::success("Tax added to income successfully"))
    }

    /// Idempotent; only detaches from incomes the user owns.
    pub async fn detach_tax(&self, user_id: i32, income_id: i32, tax_id: i32) -> Result<(), Error> {
        if IncomeRepository::new(self.db)
            .find_owned(income_id, user_id)
            .await?
            .is_none()
        {
            return Ok(());
        }

        IncomeTaxRepository::new(self.db)
            .delete_pair(income_id, tax_id)
            .await?;

        Ok(())
    }
}

fn parse_payload(payload: &IncomePayload, for_update: bool) -> Result<IncomeFields, ValidationError> {
    require_filled(&[
        &payload.name,
        &payload.value,
        &payload.recurrence,
        &payload.start_date,
    ])?;
    let income_type_id = require_id(payload.income_type_id.as_ref(), "IncomeTypeID")?;

    let value = parse_amount(&payload.value, "IncomeValue")?;
    let start_date = if for_update {
        parse_update_date(&payload.start_date)?
    } else {
        parse_date(&payload.start_date)?
    };
    let end_date = parse_optional_date(payload.end_date.as_deref(), for_update)?;

    let owning_percentage = match payload.owning_percentage.as_deref().map(str::trim) {
        None | Some("") => Decimal::ONE_HUNDRED,
        Some(raw) => {
            let percentage = parse_amount(raw, "OwningPercentage")?;
            if percentage <= Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                return Err(ValidationError::InvalidNumber("OwningPercentage"));
            }
            percentage
        }
    };

    Ok(IncomeFields {
        income_type_id,
        name: payload.name.trim().to_string(),
        value,
        recurrence: payload.recurrence.trim().to_string(),
        start_date,
        end_date,
        shared: payload.shared.unwrap_or(false),
        owning_percentage,
    })
}

fn duplicate_income(err: sea_orm::DbErr) -> Error {
    map_unique_violation(
        err,
        "Income name already exists",
        "An income with this name already exists. Please choose a different name.",
    )
}

/// Attaches the tax rows of every income in `rows`.
pub async fn with_taxes<C: ConnectionTrait>(
    db: &C,
    rows: Vec<IncomeWithType>,
) -> Result<Vec<IncomeDto>, Error> {
    let income_ids: Vec<i32> = rows.iter().map(|(income, _)| income.id).collect();

    let mut taxes_by_income: HashMap<i32, Vec<ItemTaxDto>> = HashMap::new();
    for (income_tax, tax) in IncomeTaxRepository::new(db)
        .list_by_incomes(&income_ids)
        .await?
    {
        taxes_by_income
            .entry(income_tax.user_income_id)
            .or_default()
            .push(item_tax_dto(
                income_tax.id,
                income_tax.tax_id,
                income_tax.tax_value,
                income_tax.paid,
                tax,
            ));
    }

    Ok(rows
        .into_iter()
        .map(|(income, income_type)| IncomeDto {
            id: income.id,
            user_id: income.user_id,
            income_type_id: income.income_type_id,
            income_type: income_type.map(|t| ReferenceDto::new(t.id, t.name)),
            taxes: taxes_by_income.remove(&income.id).unwrap_or_default(),
            name: income.name,
            value: income.value,
            recurrence: income.recurrence,
            start_date: income.start_date,
            end_date: income.end_date,
            shared: income.shared,
            owning_percentage: income.owning_percentage,
        })
        .collect())
}
