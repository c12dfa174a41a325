use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::ReferenceDto,
        asset::{AssetDto, AssetPayload, ItemTaxDto, TaxRefDto},
    },
    server::{
        data::{
            asset::{AssetFields, AssetRepository, AssetTaxRepository},
            group::GroupItemRepository,
            tax::TaxRepository,
        },
        error::{
            resource::{map_unique_violation, ResourceError},
            validation::ValidationError,
            Error,
        },
        model::group_item::GroupItem,
        service::tax::item_tax_dto,
        util::{
            date::{parse_date, parse_optional_date, parse_update_date},
            money::{parse_amount, tax_value},
            validation::{ensure_owner, require_filled, require_id},
        },
    },
};

type AssetWithType = (entity::user_asset::Model, Option<entity::asset_type::Model>);

pub struct AssetService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssetService<'a> {
    /// Creates a new instance of [`AssetService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<AssetDto>, Error> {
        let rows = AssetRepository::new(self.db).list_by_user(user_id).await?;

        with_taxes(self.db, rows).await
    }

    pub async fn get(&self, user_id: i32, asset_id: i32) -> Result<AssetDto, Error> {
        let row = AssetRepository::new(self.db)
            .find_owned(asset_id, user_id)
            .await?
            .ok_or_else(|| ResourceError::not_found("Asset not found"))?;

        with_taxes(self.db, vec![row])
            .await?
            .pop()
            .ok_or_else(|| Error::InternalError(format!("Asset {} lost its row", asset_id)))
    }

    /// Inserts the asset and one tax row per referenced tax in a single transaction.
    pub async fn create(&self, user_id: i32, payload: AssetPayload) -> Result<AssetDto, Error> {
        let fields = parse_payload(&payload, false)?;
        ensure_owner(payload.user_id, user_id)?;

        let txn = self.db.begin().await?;

        let asset = AssetRepository::new(&txn)
            .create(user_id, fields)
            .await
            .map_err(duplicate_asset)?;
        apply_taxes(&txn, &asset, user_id, &payload.taxes).await?;

        txn.commit().await?;

        tracing::debug!("Created asset {} for user {}", asset.id, user_id);

        self.get(user_id, asset.id).await
    }

    /// Replaces the asset fields and recomputes its tax rows from the payload.
    pub async fn update(
        &self,
        user_id: i32,
        asset_id: i32,
        payload: AssetPayload,
    ) -> Result<AssetDto, Error> {
        let fields = parse_payload(&payload, true)?;

        let txn = self.db.begin().await?;

        let asset = AssetRepository::new(&txn)
            .update(asset_id, user_id, fields)
            .await
            .map_err(duplicate_asset)?
            .ok_or_else(|| ResourceError::not_found("Asset not found"))?;

        AssetTaxRepository::new(&txn)
            .delete_by_asset(asset.id)
            .await?;
        apply_taxes(&txn, &asset, user_id, &payload.taxes).await?;

        txn.commit().await?;

        tracing::debug!("Updated asset {} for user {}", asset.id, user_id);

        self.get(user_id, asset.id).await
    }

    /// Deletes the asset, its tax rows and its group links atomically.
    ///
    /// Deleting an asset the user does not own is a no-op.
    pub async fn delete(&self, user_id: i32, asset_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let asset_repo = AssetRepository::new(&txn);
        if asset_repo.find_owned(asset_id, user_id).await?.is_none() {
            return Ok(());
        }

        AssetTaxRepository::new(&txn)
            .delete_by_asset(asset_id)
            .await?;
        GroupItemRepository::new(&txn)
            .unlink_everywhere(GroupItem::Asset(asset_id))
            .await?;
        asset_repo.delete(asset_id, user_id).await?;

        txn.commit().await?;

        tracing::debug!("Deleted asset {} for user {}", asset_id, user_id);

        Ok(())
    }
}

fn parse_payload(payload: &AssetPayload, for_update: bool) -> Result<AssetFields, ValidationError> {
    require_filled(&[&payload.name, &payload.value, &payload.acquisition_date])?;
    let asset_type_id = require_id(payload.asset_type_id.as_ref(), "AssetTypeID")?;

    let value = parse_amount(&payload.value, "AssetValue")?;
    let acquisition_date = if for_update {
        parse_update_date(&payload.acquisition_date)?
    } else {
        parse_date(&payload.acquisition_date)?
    };
    let disposition_date = parse_optional_date(payload.disposition_date.as_deref(), for_update)?;

    Ok(AssetFields {
        asset_type_id,
        name: payload.name.trim().to_string(),
        acquisition_date,
        disposition_date,
        value,
        shared: payload.shared.unwrap_or(false),
    })
}

fn duplicate_asset(err: sea_orm::DbErr) -> Error {
    map_unique_violation(
        err,
        "Asset name already exists",
        "An asset with this name and type already exists. Please choose a different name.",
    )
}

/// Writes one tax row per distinct referenced tax, valued from the asset amount.
async fn apply_taxes<C: ConnectionTrait>(
    db: &C,
    asset: &entity::user_asset::Model,
    user_id: i32,
    taxes: &[TaxRefDto],
) -> Result<(), Error> {
    let mut tax_ids: Vec<i32> = taxes.iter().map(|t| t.tax_id).filter(|id| *id > 0).collect();
    tax_ids.sort_unstable();
    tax_ids.dedup();

    let owned = TaxRepository::new(db).find_owned_many(&tax_ids, user_id).await?;
    if owned.len() != tax_ids.len() {
        return Err(ResourceError::not_found("Tax not found").into());
    }

    let asset_tax_repo = AssetTaxRepository::new(db);
    for tax in owned {
        asset_tax_repo
            .create(asset.id, tax.id, tax_value(asset.value, tax.percentage))
            .await?;
    }

    Ok(())
}

/// Attaches the tax rows of every asset in `rows`.
pub async fn with_taxes<C: ConnectionTrait>(
    db: &C,
    rows: Vec<AssetWithType>,
) -> Result<Vec<AssetDto>, Error> {
    let asset_ids: Vec<i32> = rows.iter().map(|(asset, _)| asset.id).collect();

    let mut taxes_by_asset: HashMap<i32, Vec<ItemTaxDto>> = HashMap::new();
    for (asset_tax, tax) in AssetTaxRepository::new(db).list_by_assets(&asset_ids).await? {
        taxes_by_asset
            .entry(asset_tax.user_asset_id)
            .or_default()
            .push(item_tax_dto(
                asset_tax.id,
                asset_tax.tax_id,
                asset_tax.tax_value,
                asset_tax.paid,
                tax,
            ));
    }

    Ok(rows
        .into_iter()
        .map(|(asset, asset_type)| AssetDto {
            id: asset.id,
            user_id: asset.user_id,
            asset_type_id: asset.asset_type_id,
            asset_type: asset_type.map(|t| ReferenceDto::new(t.id, t.name)),
            taxes: taxes_by_asset.remove(&asset.id).unwrap_or_default(),
            name: asset.name,
            acquisition_date: asset.acquisition_date,
            disposition_date: asset.disposition_date,
            value: asset.value,
            shared: asset.shared,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use finanapp_test_utils::prelude::*;
    use rust_decimal::Decimal;
    use sea_orm::ConnectionTrait;

    use super::AssetService;
    use crate::{
        model::{
            api::IdValue,
            asset::{AssetPayload, TaxRefDto},
        },
        server::error::{
            auth::AuthError, resource::ResourceError, validation::ValidationError, Error,
        },
    };

    fn payload(user_id: i32, name: &str, value: &str, taxes: &[i32]) -> AssetPayload {
        AssetPayload {
            name: name.to_string(),
            value: value.to_string(),
            asset_type_id: Some(IdValue::Number(1)),
            acquisition_date: "2023-06-01".to_string(),
            disposition_date: None,
            shared: Some(false),
            user_id,
            taxes: taxes.iter().map(|id| TaxRefDto { tax_id: *id }).collect(),
        }
    }

    mod create {
        use super::*;

        /// Expect the asset with one computed tax row per referenced tax
        #[tokio::test]
        async fn computes_tax_rows() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let icms = test
                .finance()
                .insert_tax(user.id, 1, "ICMS", Decimal::new(18, 0))
                .await?;
            let iptu = test
                .finance()
                .insert_tax(user.id, 1, "IPTU", Decimal::new(15, 1))
                .await?;

            let service = AssetService::new(&test.db);
            let result = service
                .create(user.id, payload(user.id, "Flat", "1500.50", &[icms.id, iptu.id]))
                .await;

            assert!(result.is_ok());
            let asset = result.unwrap();
            assert_eq!(asset.value, Decimal::new(150050, 2));
            assert_eq!(asset.taxes.len(), 2);
            let values: Vec<Decimal> = asset.taxes.iter().map(|t| t.tax_value).collect();
            assert!(values.contains(&Decimal::new(27009, 2)));
            assert!(values.contains(&Decimal::new(2251, 2)));

            Ok(())
        }

        /// Expect nothing persisted when a referenced tax belongs to someone else
        #[tokio::test]
        async fn rolls_back_on_foreign_tax() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let foreign = test
                .finance()
                .insert_tax(bob.id, 1, "ICMS", Decimal::new(18, 0))
                .await?;

            let service = AssetService::new(&test.db);
            let result = service
                .create(ana.id, payload(ana.id, "Flat", "100", &[foreign.id]))
                .await;

            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::NotFound(_)))
            ));
            assert!(service.list(ana.id).await.unwrap().is_empty());

            Ok(())
        }

        /// Expect RequiredFields when the name is blank
        #[tokio::test]
        async fn requires_fields() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;

            let service = AssetService::new(&test.db);
            let result = service.create(user.id, payload(user.id, "", "100", &[])).await;

            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::RequiredFields))
            ));

            Ok(())
        }

        /// Expect 401 when the payload names another owner
        #[tokio::test]
        async fn rejects_owner_mismatch() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;

            let service = AssetService::new(&test.db);
            let result = service.create(ana.id, payload(bob.id, "Flat", "100", &[])).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::OwnerMismatch { .. }))
            ));

            Ok(())
        }
    }

    mod update {
        use super::*;

        /// Expect the tax rows recomputed from the new value and list
        #[tokio::test]
        async fn replaces_tax_rows() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let icms = test
                .finance()
                .insert_tax(user.id, 1, "ICMS", Decimal::new(18, 0))
                .await?;
            let iptu = test
                .finance()
                .insert_tax(user.id, 1, "IPTU", Decimal::new(10, 0))
                .await?;

            let service = AssetService::new(&test.db);
            let asset = service
                .create(user.id, payload(user.id, "Flat", "1000", &[icms.id]))
                .await
                .unwrap();

            let mut update = payload(0, "Flat", "2000", &[iptu.id]);
            update.acquisition_date = "2023-06-01T00:00:00+00:00".to_string();
            let result = service.update(user.id, asset.id, update).await;

            assert!(result.is_ok());
            let asset = result.unwrap();
            assert_eq!(asset.taxes.len(), 1);
            assert_eq!(asset.taxes[0].tax_id, iptu.id);
            assert_eq!(asset.taxes[0].tax_value, Decimal::new(200, 0));

            Ok(())
        }

        /// Expect 404 for an asset the user does not own
        #[tokio::test]
        async fn not_found_for_foreign_asset() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let asset = test
                .finance()
                .insert_asset(ana.id, "Flat", Decimal::new(100, 0))
                .await?;

            let service = AssetService::new(&test.db);
            let result = service
                .update(bob.id, asset.id, payload(0, "Flat", "100", &[]))
                .await;

            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::NotFound(_)))
            ));

            Ok(())
        }
    }

    mod delete {
        use super::*;

        /// Expect the asset, its tax rows and its group links to be gone
        #[tokio::test]
        async fn removes_dependents() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let asset = test
                .finance()
                .insert_asset(user.id, "Flat", Decimal::new(1000, 0))
                .await?;
            let tax = test
                .finance()
                .insert_tax(user.id, 1, "ICMS", Decimal::new(18, 0))
                .await?;
            test.finance()
                .insert_asset_tax(asset.id, tax.id, Decimal::new(180, 0))
                .await?;
            let group = test.group().insert_group(user.id, "Home").await?;
            test.group().link_asset(group.id, asset.id).await?;

            let service = AssetService::new(&test.db);
            let result = service.delete(user.id, asset.id).await;

            assert!(result.is_ok());
            assert!(service.list(user.id).await.unwrap().is_empty());

            Ok(())
        }

        /// Expect the tax rows and the asset to survive when the final delete fails
        #[tokio::test]
        async fn rolls_back_on_failure() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let user = test.user().insert_user("ana@example.com").await?;
            let asset = test
                .finance()
                .insert_asset(user.id, "Flat", Decimal::new(1000, 0))
                .await?;
            let tax = test
                .finance()
                .insert_tax(user.id, 1, "ICMS", Decimal::new(18, 0))
                .await?;
            test.finance()
                .insert_asset_tax(asset.id, tax.id, Decimal::new(180, 0))
                .await?;
            test.db
                .execute_unprepared(
                    "CREATE TRIGGER keep_asset BEFORE DELETE ON user_asset \
                     BEGIN SELECT RAISE(ABORT, 'asset is locked'); END;",
                )
                .await?;

            let service = AssetService::new(&test.db);
            let result = service.delete(user.id, asset.id).await;

            assert!(result.is_err());
            let kept = service.get(user.id, asset.id).await.unwrap();
            assert_eq!(kept.taxes.len(), 1);
            assert_eq!(kept.taxes[0].tax_value, Decimal::new(180, 0));

            Ok(())
        }

        /// Expect success and no effect for another user's asset
        #[tokio::test]
        async fn ignores_foreign_asset() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let asset = test
                .finance()
                .insert_asset(ana.id, "Flat", Decimal::new(1000, 0))
                .await?;

            let service = AssetService::new(&test.db);
            let result = service.delete(bob.id, asset.id).await;

            assert!(result.is_ok());
            assert_eq!(service.list(ana.id).await.unwrap().len(), 1);

            Ok(())
        }
    }
}
