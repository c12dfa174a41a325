use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::ReferenceDto,
        auth::AuthStatusDto,
        user::{DashboardDto, ProfileUpdateDto, ProfileUpdatedDto, UserDto},
    },
    server::{
        data::{group::GroupRepository, reference::ReferenceRepository, user::UserRepository},
        error::{auth::AuthError, validation::ValidationError, Error},
        model::reference::LookupTable,
        service::{
            asset::AssetService, expense::ExpenseService, group::group_summary,
            income::IncomeService, tax::TaxService,
        },
        util::validation::{capitalize, check_person},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn auth_status(user: &entity::user::Model) -> AuthStatusDto {
        AuthStatusDto {
            authenticated: true,
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
            date_of_birth: user.date_of_birth,
            created_at: user.created_at,
        }
    }

    /// Collects the user's items, taxes, groups and the asset types for the dashboard
    pub async fn dashboard(&self, user: entity::user::Model) -> Result<DashboardDto, Error> {
        let user_id = user.id;

        let groups = GroupRepository::new(self.db)
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|(group, _)| group_summary(group))
            .collect();

        let asset_types = ReferenceRepository::new(self.db)
            .list(LookupTable::AssetType)
            .await?
            .into_iter()
            .map(|row| ReferenceDto::new(row.id, row.name))
            .collect();

        Ok(DashboardDto {
            user: UserDto::from(user),
            assets: AssetService::new(self.db).list(user_id).await?,
            incomes: IncomeService::new(self.db).list(user_id).await?,
            expenses: ExpenseService::new(self.db).list(user_id).await?,
            taxes: TaxService::new(self.db).list(user_id).await?,
            groups,
            asset_types,
        })
    }

    /// Replaces the names and date of birth of the authenticated user
    pub async fn update_profile(
        &self,
        user_id: i32,
        payload: ProfileUpdateDto,
    ) -> Result<ProfileUpdatedDto, Error> {
        let first_name = payload.first_name.trim();
        let last_name = payload.last_name.trim();

        let mut messages = Vec::new();
        let date_of_birth = check_person(
            first_name,
            last_name,
            payload.date_of_birth.trim(),
            &mut messages,
        );

        let date_of_birth = match date_of_birth {
            Some(date) if messages.is_empty() => date,
            _ => return Err(ValidationError::Messages(messages).into()),
        };

        let user = UserRepository::new(self.db)
            .update_profile(
                user_id,
                capitalize(first_name),
                capitalize(last_name),
                date_of_birth,
            )
            .await?
            .ok_or(AuthError::Unauthorized)?;

        tracing::debug!("Updated profile of user {}", user.id);

        Ok(ProfileUpdatedDto {
            status: "success".to_string(),
            message: "Profile updated successfully".to_string(),
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
        })
    }
}
