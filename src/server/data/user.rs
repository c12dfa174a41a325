use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

/// Validated registration data ready to insert.
pub struct NewUser {
    pub user_type_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active user
    pub async fn create(&self, user: NewUser) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::user::ActiveModel {
            user_type_id: ActiveValue::Set(user.user_type_id),
            password: ActiveValue::Set(user.password_hash),
            first_name: ActiveValue::Set(user.first_name),
            last_name: ActiveValue::Set(user.last_name),
            email_address: ActiveValue::Set(user.email),
            date_of_birth: ActiveValue::Set(Some(user.date_of_birth)),
            is_active: ActiveValue::Set(true),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::EmailAddress.eq(email))
            .one(self.db)
            .await
    }

    /// Sets `last_login` to now, returns `None` if the user does not exist
    pub async fn update_last_login(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut user_am = user.into_active_model();
        user_am.last_login = ActiveValue::Set(Some(now));
        user_am.updated_at = ActiveValue::Set(now);

        Ok(Some(user_am.update(self.db).await?))
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        first_name: String,
        last_name: String,
        date_of_birth: NaiveDate,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.first_name = ActiveValue::Set(first_name);
        user_am.last_name = ActiveValue::Set(last_name);
        user_am.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }
}
