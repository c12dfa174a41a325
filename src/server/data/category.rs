use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct UserCategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserCategoryRepository<'a, C> {
    /// Creates a new instance of [`UserCategoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        name: &str,
    ) -> Result<entity::user_category::Model, DbErr> {
        let category = entity::user_category::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            is_active: ActiveValue::Set(true),
            ..Default::default()
        };

        category.insert(self.db).await
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::user_category::Model>, DbErr> {
        entity::prelude::UserCategory::find()
            .filter(entity::user_category::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_category::Column::Id)
            .all(self.db)
            .await
    }

    /// Deletes a category owned by the user
    ///
    /// Returns OK regardless of the category existing, check [`DeleteResult::rows_affected`]
    /// to confirm the deletion.
    pub async fn delete(&self, category_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserCategory::delete_many()
            .filter(entity::user_category::Column::Id.eq(category_id))
            .filter(entity::user_category::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
