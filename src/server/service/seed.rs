//! Idempotent seed pass for reference data and the default accounts.
//!
//! Every row is inserted only when no row with the same natural key exists, so running
//! the seed on every startup is safe. Lookup rows are written in a fixed order to keep
//! their ids stable on an empty database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, TransactionTrait,
};

use crate::server::{
    data::{
        reference::ReferenceRepository,
        tax::{TaxFields, TaxRepository},
        user::{NewUser, UserRepository},
    },
    error::Error,
    model::reference::LookupTable,
    util::password::hash_password,
};

const SEED_PASSWORD: &str = "password123";

const LOOKUP_ROWS: [(LookupTable, &[&str]); 8] = [
    (LookupTable::IncomeType, &["Salary", "Investments"]),
    (LookupTable::ExpenditureType, &["General", "HomeCare"]),
    (LookupTable::TaxType, &["Asset", "Income"]),
    (LookupTable::AssetType, &["Apartment", "Car"]),
    (LookupTable::GroupType, &["Family", "Business"]),
    (LookupTable::FileType, &["Receipt", "Contract"]),
    (LookupTable::Currency, &["BRL", "USD", "EUR"]),
    (LookupTable::Recurrency, &["Monthly", "Yearly"]),
];

const USER_TYPES: [&str; 2] = ["admin", "user"];

/// Group roles with their view permission.
const USER_ROLES: [(&str, bool); 3] = [("Advance", true), ("Basic", true), ("Viewer", false)];

/// `(email, user type, name)` of the default accounts.
const SEED_USERS: [(&str, &str, &str); 2] = [
    ("admin@example.com", "admin", "Admin"),
    ("user@example.com", "user", "User"),
];

/// `(name, tax type, percentage, cycle)` of the admin's taxes.
const SEED_TAXES: [(&str, &str, i64, &str); 2] = [
    ("ICMS", "Asset", 18, "Monthly"),
    ("IPVA", "Income", 4, "Yearly"),
];

pub struct SeedService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeedService<'a> {
    /// Creates a new instance of [`SeedService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn run(&self) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        for name in USER_TYPES {
            ensure_user_type(&txn, name).await?;
        }
        for (name, view_permission) in USER_ROLES {
            ensure_user_role(&txn, name, view_permission).await?;
        }

        let reference_repo = ReferenceRepository::new(&txn);
        for (table, names) in LOOKUP_ROWS {
            for name in names {
                reference_repo.ensure(table, name).await?;
            }
        }

        let user_repo = UserRepository::new(&txn);
        let mut admin_id = None;
        for (email, user_type, name) in SEED_USERS {
            let user = match user_repo.find_by_email(email).await? {
                Some(user) => user,
                None => {
                    let user_type_id = ensure_user_type(&txn, user_type).await?;
                    let user = user_repo
                        .create(NewUser {
                            user_type_id,
                            first_name: name.to_string(),
                            last_name: name.to_string(),
                            email: email.to_string(),
                            password_hash: hash_password(SEED_PASSWORD)?,
                            date_of_birth: NaiveDate::default(),
                        })
                        .await?;

                    tracing::info!("Seeded user {}", email);

                    user
                }
            };

            if user_type == "admin" {
                admin_id = Some(user.id);
            }
        }

        if let Some(admin_id) = admin_id {
            let tax_repo = TaxRepository::new(&txn);
            let existing: Vec<String> = tax_repo
                .list_by_user(admin_id)
                .await?
                .into_iter()
                .map(|(tax, _)| tax.name)
                .collect();

            for (name, tax_type, percentage, cycle) in SEED_TAXES {
                if existing.iter().any(|n| n == name) {
                    continue;
                }

                let tax_type = reference_repo.ensure(LookupTable::TaxType, tax_type).await?;
                tax_repo
                    .create(
                        admin_id,
                        TaxFields {
                            tax_type_id: tax_type.id,
                            name: name.to_string(),
                            percentage: Decimal::new(percentage, 0),
                            percentage_range: "0-100%".to_string(),
                            applicable_cycle: cycle.to_string(),
                        },
                    )
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::info!("Seed data is in place");

        Ok(())
    }
}

async fn ensure_user_type<C: ConnectionTrait>(db: &C, name: &str) -> Result<i32, DbErr> {
    if let Some(existing) = entity::prelude::UserType::find()
        .filter(entity::user_type::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing.id);
    }

    let user_type = entity::user_type::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        is_active: ActiveValue::Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(user_type.id)
}

async fn ensure_user_role<C: ConnectionTrait>(
    db: &C,
    name: &str,
    view_permission: bool,
) -> Result<i32, DbErr> {
    if let Some(existing) = entity::prelude::UserRole::find()
        .filter(entity::user_role::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing.id);
    }

    let role = entity::user_role::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        view_permission: ActiveValue::Set(view_permission),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(role.id)
}

#[cfg(test)]
mod tests {
    use finanapp_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use super::SeedService;
    use crate::server::util::password::verify_password;

    /// Expect a second run to leave the row counts unchanged
    #[tokio::test]
    async fn seed_is_idempotent() -> Result<(), TestError> {
        let test = test_setup_with_schema!()?;
        let service = SeedService::new(&test.db);

        assert!(service.run().await.is_ok());
        assert!(service.run().await.is_ok());

        assert_eq!(entity::prelude::UserType::find().all(&test.db).await?.len(), 2);
        assert_eq!(entity::prelude::UserRole::find().all(&test.db).await?.len(), 3);
        assert_eq!(entity::prelude::Currency::find().all(&test.db).await?.len(), 3);
        assert_eq!(entity::prelude::User::find().all(&test.db).await?.len(), 2);
        assert_eq!(entity::prelude::Tax::find().all(&test.db).await?.len(), 2);

        Ok(())
    }

    /// Expect the default accounts to use the seed password and ids matching the fixtures
    #[tokio::test]
    async fn seeds_accounts() -> Result<(), TestError> {
        let test = test_setup_with_schema!()?;
        SeedService::new(&test.db).run().await.unwrap();

        let users = entity::prelude::User::find().all(&test.db).await?;
        let admin = users
            .iter()
            .find(|u| u.email_address == "admin@example.com")
            .unwrap();
        assert_eq!(admin.user_type_id, 1);
        assert!(verify_password("password123", &admin.password).unwrap());

        let viewer = entity::prelude::UserRole::find_by_id(3).one(&test.db).await?.unwrap();
        assert_eq!(viewer.name, "Viewer");
        assert!(!viewer.view_permission);

        Ok(())
    }
}
