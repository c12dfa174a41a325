use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{constant::TEST_PASSWORD, error::TestError, TestSetup};

impl TestSetup {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Inserts an active user of type `user` whose password is [`TEST_PASSWORD`].
    pub async fn insert_user(&self, email: &str) -> Result<entity::user::Model, TestError> {
        self.insert_user_with_status(email, true).await
    }

    pub async fn insert_user_with_status(
        &self,
        email: &str,
        is_active: bool,
    ) -> Result<entity::user::Model, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password = Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)?
            .to_string();
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                user_type_id: ActiveValue::Set(2),
                password: ActiveValue::Set(password),
                first_name: ActiveValue::Set("Test".to_string()),
                last_name: ActiveValue::Set("User".to_string()),
                email_address: ActiveValue::Set(email.to_string()),
                date_of_birth: ActiveValue::Set(NaiveDate::from_ymd_opt(1990, 5, 20)),
                is_active: ActiveValue::Set(is_active),
                last_login: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn get_by_email(&self, email: &str) -> Result<entity::user::Model, TestError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::EmailAddress.eq(email))
            .one(&self.setup.db)
            .await?
            .ok_or_else(|| TestError::Setup(format!("fixture user {email} not found")))
    }
}
