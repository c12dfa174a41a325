use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::ReferenceDto,
        category::{CategoriesDto, CategoryCreatedDto, CategoryPayload, UserCategoryDto},
    },
    server::{
        data::{
            category::UserCategoryRepository,
            reference::{ReferenceRepository, ReferenceRow},
        },
        error::{
            resource::{map_foreign_key_violation, map_unique_violation, ResourceError},
            Error,
        },
        model::reference::{CategoryKind, LookupTable},
        util::validation::{ensure_owner, require_filled},
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    /// Creates a new instance of [`CategoryService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every lookup table plus the user's own categories
    pub async fn list(&self, user_id: i32) -> Result<CategoriesDto, Error> {
        let user_categories = UserCategoryRepository::new(self.db)
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|category| UserCategoryDto {
                id: category.id,
                user_id: category.user_id,
                name: category.name,
                is_active: category.is_active,
            })
            .collect();

        Ok(CategoriesDto {
            asset_types: self.lookup(LookupTable::AssetType).await?,
            income_types: self.lookup(LookupTable::IncomeType).await?,
            expenditure_types: self.lookup(LookupTable::ExpenditureType).await?,
            tax_types: self.lookup(LookupTable::TaxType).await?,
            group_types: self.lookup(LookupTable::GroupType).await?,
            file_types: self.lookup(LookupTable::FileType).await?,
            currencies: self.lookup(LookupTable::Currency).await?,
            recurrencies: self.lookup(LookupTable::Recurrency).await?,
            user_categories,
        })
    }

    pub async fn lookup(&self, table: LookupTable) -> Result<Vec<ReferenceDto>, Error> {
        let rows = ReferenceRepository::new(self.db).list(table).await?;

        Ok(rows.into_iter().map(reference_dto).collect())
    }

    pub async fn create(
        &self,
        user_id: i32,
        payload: CategoryPayload,
    ) -> Result<CategoryCreatedDto, Error> {
        require_filled(&[&payload.model, &payload.name])?;
        let kind: CategoryKind = payload.model.parse()?;
        ensure_owner(payload.user_id, user_id)?;

        let name = payload.name.trim();
        let created = match kind {
            CategoryKind::Lookup(table) => ReferenceRepository::new(self.db)
                .create(table, name)
                .await
                .map(reference_dto),
            CategoryKind::UserCategory => UserCategoryRepository::new(self.db)
                .create(user_id, name)
                .await
                .map(|category| ReferenceDto::new(category.id, category.name)),
        }
        .map_err(|e| {
            map_unique_violation(
                e,
                "Category name already exists",
                "A Category with this name already exists. Please choose a different name.",
            )
        })?;

        tracing::debug!("Created {} {} for user {}", kind, created.id, user_id);

        Ok(CategoryCreatedDto {
            message: "Category created successfully!".to_string(),
            model: kind.tag().to_string(),
            category: created,
        })
    }

    /// User categories must belong to the user, lookup rows delete idempotently
    pub async fn delete(&self, user_id: i32, model: &str, id: i32) -> Result<(), Error> {
        let kind: CategoryKind = model.parse()?;

        match kind {
            CategoryKind::UserCategory => {
                let result = UserCategoryRepository::new(self.db)
                    .delete(id, user_id)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(ResourceError::not_found("Category not found or unauthorized").into());
                }
            }
            CategoryKind::Lookup(table) => {
                ReferenceRepository::new(self.db)
                    .delete(table, id)
                    .await
                    .map_err(|e| {
                        map_foreign_key_violation(
                            e,
                            table.tag(),
                            "You must delete the items using this category before deleting it",
                        )
                    })?;
            }
        }

        tracing::debug!("Deleted {} {} for user {}", kind, id, user_id);

        Ok(())
    }
}

fn reference_dto(row: ReferenceRow) -> ReferenceDto {
    ReferenceDto::new(row.id, row.name)
}

#[cfg(test)]
mod tests {
    use finanapp_test_utils::prelude::*;

    use super::CategoryService;
    use crate::{
        model::category::CategoryPayload,
        server::error::{resource::ResourceError, validation::ValidationError, Error},
    };

    fn payload(model: &str, name: &str, user_id: i32) -> CategoryPayload {
        CategoryPayload {
            model: model.to_string(),
            name: name.to_string(),
            user_id,
        }
    }

    /// Expect every lookup table and the user's categories in the listing
    #[tokio::test]
    async fn lists_reference_data() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        test.finance().insert_category(user.id, "Travel").await?;

        let service = CategoryService::new(&test.db);
        let result = service.list(user.id).await;

        assert!(result.is_ok());
        let categories = result.unwrap();
        assert_eq!(categories.asset_types.len(), 2);
        assert_eq!(categories.currencies.len(), 3);
        assert_eq!(categories.user_categories.len(), 1);

        Ok(())
    }

    /// Expect a lookup row and a user category to be created by tag
    #[tokio::test]
    async fn creates_by_tag() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let service = CategoryService::new(&test.db);

        let currency = service
            .create(user.id, payload("currency", "GBP", user.id))
            .await
            .unwrap();
        assert_eq!(currency.model, "currency");
        assert_eq!(currency.category.name, "GBP");

        let category = service
            .create(user.id, payload("userCategory", "Travel", user.id))
            .await
            .unwrap();
        assert_eq!(category.model, "userCategory");

        Ok(())
    }

    /// Expect UnknownModel for a tag outside the closed set
    #[tokio::test]
    async fn rejects_unknown_model() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;

        let service = CategoryService::new(&test.db);
        let result = service
            .create(user.id, payload("UserProfile", "x", user.id))
            .await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::UnknownModel))
        ));

        Ok(())
    }

    /// Expect 409 and no second row for a duplicate user category
    #[tokio::test]
    async fn rejects_duplicate_name() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        test.finance().insert_category(user.id, "Travel").await?;

        let service = CategoryService::new(&test.db);
        let result = service
            .create(user.id, payload("userCategory", "Travel", user.id))
            .await;

        assert!(matches!(
            result,
            Err(Error::ResourceError(ResourceError::Conflict { .. }))
        ));
        assert_eq!(service.list(user.id).await.unwrap().user_categories.len(), 1);

        Ok(())
    }

    /// Expect 404 when deleting another user's category
    #[tokio::test]
    async fn delete_foreign_user_category() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let ana = test.user().insert_user("ana@example.com").await?;
        let bob = test.user().insert_user("bob@example.com").await?;
        let category = test.finance().insert_category(ana.id, "Travel").await?;

        let service = CategoryService::new(&test.db);
        let result = service.delete(bob.id, "userCategory", category.id).await;

        assert!(matches!(
            result,
            Err(Error::ResourceError(ResourceError::NotFound(_)))
        ));

        Ok(())
    }

    /// Expect 409 when deleting an asset type still used by an asset
    #[tokio::test]
    async fn delete_lookup_in_use() -> Result<(), TestError> {
        let test = test_setup_with_reference_data!()?;
        let user = test.user().insert_user("ana@example.com").await?;
        test.finance()
            .insert_asset(user.id, "Flat", rust_decimal::Decimal::ONE)
            .await?;

        let service = CategoryService::new(&test.db);
        let result = service.delete(user.id, "assetType", 1).await;

        assert!(matches!(
            result,
            Err(Error::ResourceError(
                ResourceError::ForeignKeyViolation { .. }
            ))
        ));

        Ok(())
    }
}
