use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::{MessageDto, ReferenceDto},
        asset::AssetDto,
        expense::ExpenseDto,
        group::{
            GroupCreatedDto, GroupDto, GroupInviteDto, GroupInvitePayload, GroupItemPayload,
            GroupListDto, GroupMemberDto, GroupPayload, GroupSummaryDto,
        },
        income::IncomeDto,
    },
    server::{
        data::{
            asset::AssetRepository,
            expense::ExpenseRepository,
            group::{
                GroupInviteRepository, GroupItemRepository, GroupMemberRepository,
                GroupRepository,
            },
            income::IncomeRepository,
            reference::ReferenceRepository,
            user::UserRepository,
        },
        error::{
            resource::{map_foreign_key_violation, map_unique_violation, ResourceError},
            validation::ValidationError,
            Error,
        },
        model::{group_item::GroupItem, reference::LookupTable},
        service::{asset, expense::expense_dto, income::with_taxes},
        util::validation::{ensure_owner, is_valid_email, require_filled, require_id},
    },
};

/// Role given to invited users, it carries no view permission until activated.
const INVITED_ROLE_ID: i32 = 3;

pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    /// Creates a new instance of [`GroupService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's groups with members, invites and attached items
    ///
    /// Also returns the caller's shared incomes and expenses so they can be attached, and
    /// every group type.
    pub async fn list(&self, user_id: i32) -> Result<GroupListDto, Error> {
        let groups = GroupRepository::new(self.db).list_by_user(user_id).await?;
        let group_ids: Vec<i32> = groups.iter().map(|(group, _)| group.id).collect();

        let mut members: HashMap<i32, Vec<GroupMemberDto>> = HashMap::new();
        for (member, role) in GroupMemberRepository::new(self.db)
            .list_by_groups(&group_ids)
            .await?
        {
            members
                .entry(member.group_id)
                .or_default()
                .push(GroupMemberDto {
                    id: member.id,
                    user_id: member.user_id,
                    role: role.map(|role| ReferenceDto::new(role.id, role.name)),
                    active: member.active,
                });
        }

        let mut invites: HashMap<i32, Vec<GroupInviteDto>> = HashMap::new();
        for invite in GroupInviteRepository::new(self.db)
            .list_by_groups(&group_ids)
            .await?
        {
            invites
                .entry(invite.group_id)
                .or_default()
                .push(GroupInviteDto {
                    id: invite.id,
                    invite_email: invite.invite_email,
                });
        }

        let items = GroupItemRepository::new(self.db);
        let income_links = items.list_income_links(&group_ids).await?;
        let expense_links = items.list_expense_links(&group_ids).await?;
        let asset_links = items.list_asset_links(&group_ids).await?;

        let income_ids: Vec<i32> = income_links.iter().map(|l| l.user_income_id).collect();
        let incomes: HashMap<i32, IncomeDto> = with_taxes(
            self.db,
            IncomeRepository::new(self.db).list_by_ids(&income_ids).await?,
        )
        .await?
        .into_iter()
        .map(|income| (income.id, income))
        .collect();

        let expense_ids: Vec<i32> = expense_links.iter().map(|l| l.user_expense_id).collect();
        let expenses: HashMap<i32, ExpenseDto> = ExpenseRepository::new(self.db)
            .list_by_ids(&expense_ids)
            .await?
            .into_iter()
            .map(|(expense, expenditure_type)| (expense.id, expense_dto(expense, expenditure_type)))
            .collect();

        let asset_ids: Vec<i32> = asset_links.iter().map(|l| l.user_asset_id).collect();
        let assets: HashMap<i32, AssetDto> = asset::with_taxes(
            self.db,
            AssetRepository::new(self.db).list_by_ids(&asset_ids).await?,
        )
        .await?
        .into_iter()
        .map(|asset| (asset.id, asset))
        .collect();

        let mut group_incomes: HashMap<i32, Vec<IncomeDto>> = HashMap::new();
        for link in income_links {
            if let Some(income) = incomes.get(&link.user_income_id) {
                group_incomes
                    .entry(link.group_id)
                    .or_default()
                    .push(income.clone());
            }
        }

        let mut group_expenses: HashMap<i32, Vec<ExpenseDto>> = HashMap::new();
        for link in expense_links {
            if let Some(expense) = expenses.get(&link.user_expense_id) {
                group_expenses
                    .entry(link.group_id)
                    .or_default()
                    .push(expense.clone());
            }
        }

        let mut group_assets: HashMap<i32, Vec<AssetDto>> = HashMap::new();
        for link in asset_links {
            if let Some(asset) = assets.get(&link.user_asset_id) {
                group_assets
                    .entry(link.group_id)
                    .or_default()
                    .push(asset.clone());
            }
        }

        let groups = groups
            .into_iter()
            .map(|(group, group_type)| GroupDto {
                members: members.remove(&group.id).unwrap_or_default(),
                invites: invites.remove(&group.id).unwrap_or_default(),
                incomes: group_incomes.remove(&group.id).unwrap_or_default(),
                expenses: group_expenses.remove(&group.id).unwrap_or_default(),
                assets: group_assets.remove(&group.id).unwrap_or_default(),
                group_type: group_type.map(|t| ReferenceDto::new(t.id, t.name)),
                group: group_summary(group),
            })
            .collect();

        let shared_incomes = with_taxes(
            self.db,
            IncomeRepository::new(self.db)
                .list_shared_by_user(user_id)
                .await?,
        )
        .await?;

        let shared_expenses = ExpenseRepository::new(self.db)
            .list_shared_by_user(user_id)
            .await?
            .into_iter()
            .map(|(expense, expenditure_type)| expense_dto(expense, expenditure_type))
            .collect();

        let group_types = ReferenceRepository::new(self.db)
            .list(LookupTable::GroupType)
            .await?
            .into_iter()
            .map(|row| ReferenceDto::new(row.id, row.name))
            .collect();

        Ok(GroupListDto {
            groups,
            shared_incomes,
            shared_expenses,
            group_types,
        })
    }

    pub async fn create(
        &self,
        user_id: i32,
        payload: GroupPayload,
    ) -> Result<GroupCreatedDto, Error> {
        require_filled(&[&payload.name])?;
        let group_type_id = require_id(payload.group_type_id.as_ref(), "GroupTypeID")?;
        ensure_owner(payload.user_id, user_id)?;

        let group = GroupRepository::new(self.db)
            .create(user_id, group_type_id, payload.name.trim())
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    "Group name already exists",
                    "A group with this name already exists. Please choose a different name.",
                )
            })?;

        tracing::debug!("Created group {} for user {}", group.id, user_id);

        Ok(GroupCreatedDto {
            message: "Group created successfully!".to_string(),
            group: group_summary(group),
        })
    }

    /// Attaches one of the caller's own incomes, expenses or assets to the group
    pub async fn attach_item(
        &self,
        user_id: i32,
        group_id: i32,
        payload: GroupItemPayload,
    ) -> Result<MessageDto, Error> {
        require_filled(&[&payload.item])?;
        let item: GroupItem = payload.item.trim().parse()?;

        self.owned_group(group_id, user_id).await?;

        let owned = match item {
            GroupItem::Income(id) => IncomeRepository::new(self.db)
                .find_owned(id, user_id)
                .await?
                .is_some(),
            GroupItem::Expense(id) => ExpenseRepository::new(self.db)
                .find_owned(id, user_id)
                .await?
                .is_some(),
            GroupItem::Asset(id) => AssetRepository::new(self.db)
                .find_owned(id, user_id)
                .await?
                .is_some(),
        };
        if !owned {
            return Err(ResourceError::not_found("Item not found").into());
        }

        let (kind, message) = match item {
            GroupItem::Income(_) => ("income", "Group income created successfully!"),
            GroupItem::Expense(_) => ("expenditure", "Group expenditure created successfully!"),
            GroupItem::Asset(_) => ("asset", "Group asset created successfully!"),
        };

        GroupItemRepository::new(self.db)
            .link(group_id, item)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    "Duplicate entry",
                    &format!("This {} item already exists in the group.", kind),
                )
            })?;

        tracing::debug!("Attached {} to group {}", item, group_id);

        Ok(MessageDto {
            message: message.to_string(),
        })
    }

    /// Removing an item that is not attached is not an error
    pub async fn detach_item(&self, user_id: i32, group_id: i32, item: &str) -> Result<(), Error> {
        let item: GroupItem = item.parse()?;

        self.owned_group(group_id, user_id).await?;

        let result = GroupItemRepository::new(self.db)
            .unlink(group_id, item)
            .await?;

        tracing::debug!(
            "Detached {} from group {} ({} rows)",
            item,
            group_id,
            result.rows_affected
        );

        Ok(())
    }

    /// Adds a registered user as an inactive member, otherwise records a pending invite
    pub async fn invite(
        &self,
        user_id: i32,
        group_id: i32,
        payload: GroupInvitePayload,
    ) -> Result<MessageDto, Error> {
        let email = payload.invite_email.trim();
        require_filled(&[email])?;
        if !is_valid_email(email) {
            return Err(ValidationError::Messages(vec!["Invalid email format".to_string()]).into());
        }

        self.owned_group(group_id, user_id).await?;

        let duplicate = |e| {
            map_unique_violation(
                e,
                "Duplicate entry",
                "This user has already been invited to the group.",
            )
        };

        let message = match UserRepository::new(self.db).find_by_email(email).await? {
            Some(invited) => {
                GroupMemberRepository::new(self.db)
                    .create(group_id, invited.id, INVITED_ROLE_ID, false)
                    .await
                    .map_err(duplicate)?;

                tracing::debug!("Added user {} to group {} as inactive member", invited.id, group_id);

                "User Invite Sent"
            }
            None => {
                GroupInviteRepository::new(self.db)
                    .create(group_id, email)
                    .await
                    .map_err(duplicate)?;

                tracing::debug!("Recorded invite for unknown email on group {}", group_id);

                "User not found, We've sent an Invite by Email"
            }
        };

        Ok(MessageDto {
            message: message.to_string(),
        })
    }

    /// Deletes the group with its members and invites in one transaction
    ///
    /// Attached items are kept and make the delete fail; they must be detached first.
    pub async fn delete(&self, user_id: i32, group_id: i32) -> Result<MessageDto, Error> {
        let txn = self.db.begin().await?;

        if GroupRepository::new(&txn)
            .find_owned(group_id, user_id)
            .await?
            .is_some()
        {
            GroupMemberRepository::new(&txn)
                .delete_by_group(group_id)
                .await?;
            GroupInviteRepository::new(&txn)
                .delete_by_group(group_id)
                .await?;
            GroupRepository::new(&txn)
                .delete(group_id)
                .await
                .map_err(|e| {
                    map_foreign_key_violation(
                        e,
                        "user_group",
                        "You must delete the items before deleting group",
                    )
                })?;

            tracing::debug!("Deleted group {} for user {}", group_id, user_id);
        }

        txn.commit().await?;

        Ok(MessageDto {
            message: "Group deleted successfully!".to_string(),
        })
    }

    async fn owned_group(
        &self,
        group_id: i32,
        user_id: i32,
    ) -> Result<entity::user_group::Model, Error> {
        GroupRepository::new(self.db)
            .find_owned(group_id, user_id)
            .await?
            .ok_or_else(|| ResourceError::not_found("Group not found").into())
    }
}

pub fn group_summary(group: entity::user_group::Model) -> GroupSummaryDto {
    GroupSummaryDto {
        id: group.id,
        user_id: group.user_id,
        group_type_id: group.group_type_id,
        name: group.name,
    }
}

#[cfg(test)]
mod tests {
    use finanapp_test_utils::prelude::*;
    use rust_decimal::Decimal;
    use sea_orm::EntityTrait;

    use super::GroupService;
    use crate::{
        model::{
            api::IdValue,
            group::{GroupInvitePayload, GroupItemPayload, GroupPayload},
        },
        server::error::{resource::ResourceError, validation::ValidationError, Error},
    };

    fn item(value: &str) -> GroupItemPayload {
        GroupItemPayload {
            item: value.to_string(),
        }
    }

    fn invite(email: &str) -> GroupInvitePayload {
        GroupInvitePayload {
            invite_email: email.to_string(),
        }
    }

    mod list {
        use super::*;

        /// Expect groups with their members, invites and attached items
        #[tokio::test]
        async fn lists_group_contents() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            test.group().insert_member(group.id, bob.id, 3, false).await?;
            test.group().insert_invite(group.id, "eve@example.com").await?;
            let income = test
                .finance()
                .insert_income(ana.id, "Salary", Decimal::new(5000, 0), true)
                .await?;
            let expense = test
                .finance()
                .insert_expense(ana.id, "Rent", Decimal::new(1200, 0), true)
                .await?;
            test.group().link_income(group.id, income.id).await?;
            test.group().link_expense(group.id, expense.id).await?;
            let flat = test
                .finance()
                .insert_asset(ana.id, "Flat", Decimal::new(1000, 0))
                .await?;
            let tax = test
                .finance()
                .insert_tax(ana.id, 1, "IPTU", Decimal::new(18, 0))
                .await?;
            test.finance()
                .insert_asset_tax(flat.id, tax.id, Decimal::new(180, 0))
                .await?;
            test.group().link_asset(group.id, flat.id).await?;

            let service = GroupService::new(&test.db);
            let result = service.list(ana.id).await;

            assert!(result.is_ok());
            let list = result.unwrap();
            assert_eq!(list.groups.len(), 1);
            let group = &list.groups[0];
            assert_eq!(group.members.len(), 1);
            assert_eq!(group.members[0].role.as_ref().unwrap().name, "Viewer");
            assert_eq!(group.invites.len(), 1);
            assert_eq!(group.incomes.len(), 1);
            assert_eq!(group.expenses.len(), 1);
            assert_eq!(group.assets.len(), 1);
            assert_eq!(group.assets[0].name, "Flat");
            assert_eq!(group.assets[0].taxes[0].tax_value, Decimal::new(180, 0));
            assert_eq!(list.shared_incomes.len(), 1);
            assert_eq!(list.shared_expenses.len(), 1);
            assert_eq!(list.group_types.len(), 2);

            Ok(())
        }
    }

    mod create {
        use super::*;

        fn payload(name: &str, user_id: i32) -> GroupPayload {
            GroupPayload {
                name: name.to_string(),
                group_type_id: Some(IdValue::Text("1".to_string())),
                user_id,
            }
        }

        /// Expect the created group to be owned by the caller
        #[tokio::test]
        async fn creates_group() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;

            let service = GroupService::new(&test.db);
            let result = service.create(ana.id, payload("Home", ana.id)).await;

            assert!(result.is_ok());
            let created = result.unwrap();
            assert_eq!(created.message, "Group created successfully!");
            assert_eq!(created.group.user_id, ana.id);
            assert_eq!(created.group.group_type_id, 1);

            Ok(())
        }

        /// Expect 409 for a second group with the same owner, type and name
        #[tokio::test]
        async fn rejects_duplicate() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            test.group().insert_group(ana.id, "Home").await?;

            let service = GroupService::new(&test.db);
            let result = service.create(ana.id, payload("Home", ana.id)).await;

            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::Conflict { .. }))
            ));

            Ok(())
        }
    }

    mod items {
        use super::*;

        /// Expect an owned income to attach once and the duplicate to conflict
        #[tokio::test]
        async fn attach_then_duplicate() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            let income = test
                .finance()
                .insert_income(ana.id, "Salary", Decimal::new(5000, 0), true)
                .await?;

            let service = GroupService::new(&test.db);
            let selector = format!("income_{}", income.id);

            let result = service.attach_item(ana.id, group.id, item(&selector)).await;
            assert!(result.is_ok());
            assert_eq!(result.unwrap().message, "Group income created successfully!");

            let result = service.attach_item(ana.id, group.id, item(&selector)).await;
            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::Conflict { .. }))
            ));

            Ok(())
        }

        /// Expect InvalidItemType for an unknown prefix
        #[tokio::test]
        async fn rejects_unknown_prefix() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;

            let service = GroupService::new(&test.db);
            let result = service.attach_item(ana.id, group.id, item("car_1")).await;

            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::InvalidItemType))
            ));

            Ok(())
        }

        /// Expect 404 when attaching another user's expense
        #[tokio::test]
        async fn rejects_foreign_item() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            let expense = test
                .finance()
                .insert_expense(bob.id, "Rent", Decimal::new(1200, 0), true)
                .await?;

            let service = GroupService::new(&test.db);
            let result = service
                .attach_item(ana.id, group.id, item(&format!("expense_{}", expense.id)))
                .await;

            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::NotFound(_)))
            ));

            Ok(())
        }

        /// Expect detach to succeed twice
        #[tokio::test]
        async fn detach_is_idempotent() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            let asset = test
                .finance()
                .insert_asset(ana.id, "Flat", Decimal::new(100000, 0))
                .await?;
            test.group().link_asset(group.id, asset.id).await?;

            let service = GroupService::new(&test.db);
            let selector = format!("asset_{}", asset.id);

            assert!(service.detach_item(ana.id, group.id, &selector).await.is_ok());
            assert!(service.detach_item(ana.id, group.id, &selector).await.is_ok());

            let links = entity::prelude::GroupAsset::find().all(&test.db).await?;
            assert!(links.is_empty());

            Ok(())
        }
    }

    mod invite {
        use super::*;

        /// Expect an existing user to become an inactive viewer
        #[tokio::test]
        async fn invites_existing_user() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;

            let service = GroupService::new(&test.db);
            let result = service
                .invite(ana.id, group.id, invite("bob@example.com"))
                .await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().message, "User Invite Sent");

            let members = entity::prelude::GroupMember::find().all(&test.db).await?;
            assert_eq!(members.len(), 1);
            assert_eq!(members[0].user_id, bob.id);
            assert_eq!(members[0].user_role_id, 3);
            assert!(!members[0].active);

            Ok(())
        }

        /// Expect a pending invite for an unknown email, and 409 when repeated
        #[tokio::test]
        async fn invites_unknown_email() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;

            let service = GroupService::new(&test.db);
            let result = service
                .invite(ana.id, group.id, invite("eve@example.com"))
                .await;

            assert!(result.is_ok());
            assert_eq!(
                result.unwrap().message,
                "User not found, We've sent an Invite by Email"
            );

            let result = service
                .invite(ana.id, group.id, invite("eve@example.com"))
                .await;
            assert!(matches!(
                result,
                Err(Error::ResourceError(ResourceError::Conflict { .. }))
            ));

            Ok(())
        }

        /// Expect 404 when inviting into a group owned by someone else
        #[tokio::test]
        async fn rejects_foreign_group() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;

            let service = GroupService::new(&test.db);
            let result = service
                .invite(bob.id, group.id, invite("eve@example.com"))
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

        /// Expect members and invites to go with the group
        #[tokio::test]
        async fn deletes_with_members() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            test.group().insert_member(group.id, bob.id, 3, false).await?;
            test.group().insert_invite(group.id, "eve@example.com").await?;

            let service = GroupService::new(&test.db);
            let result = service.delete(ana.id, group.id).await;

            assert!(result.is_ok());
            assert!(entity::prelude::UserGroup::find().all(&test.db).await?.is_empty());
            assert!(entity::prelude::GroupMember::find().all(&test.db).await?.is_empty());
            assert!(entity::prelude::GroupInvite::find().all(&test.db).await?.is_empty());

            Ok(())
        }

        /// Expect a foreign key conflict and every row kept while an item is attached
        #[tokio::test]
        async fn fails_with_attached_items() -> Result<(), TestError> {
            let test = test_setup_with_reference_data!()?;
            let ana = test.user().insert_user("ana@example.com").await?;
            let bob = test.user().insert_user("bob@example.com").await?;
            let group = test.group().insert_group(ana.id, "Home").await?;
            test.group().insert_member(group.id, bob.id, 3, false).await?;
            let income = test
                .finance()
                .insert_income(ana.id, "Salary", Decimal::new(5000, 0), true)
                .await?;
            test.group().link_income(group.id, income.id).await?;

            let service = GroupService::new(&test.db);
            let result = service.delete(ana.id, group.id).await;

            assert!(matches!(
                result,
                Err(Error::ResourceError(
                    ResourceError::ForeignKeyViolation { .. }
                ))
            ));
            assert_eq!(entity::prelude::UserGroup::find().all(&test.db).await?.len(), 1);
            assert_eq!(entity::prelude::GroupMember::find().all(&test.db).await?.len(), 1);

            Ok(())
        }
    }
}
