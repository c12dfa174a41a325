use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000001_reference_tables::{GroupType, UserRole},
    m20250301_000002_user::User,
};

static IDX_USER_GROUP_USER_TYPE_NAME: &str = "idx_user_group_user_id_group_type_id_name";
static IDX_GROUP_MEMBER_GROUP_USER: &str = "idx_group_member_group_id_user_id";
static IDX_GROUP_INVITE_GROUP_EMAIL: &str = "idx_group_invite_group_id_invite_email";
static FK_USER_GROUP_USER_ID: &str = "fk_user_group_user_id";
static FK_USER_GROUP_GROUP_TYPE_ID: &str = "fk_user_group_group_type_id";
static FK_GROUP_MEMBER_GROUP_ID: &str = "fk_group_member_group_id";
static FK_GROUP_MEMBER_USER_ID: &str = "fk_group_member_user_id";
static FK_GROUP_MEMBER_USER_ROLE_ID: &str = "fk_group_member_user_role_id";
static FK_GROUP_INVITE_GROUP_ID: &str = "fk_group_invite_group_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(UserGroup::Id))
                    .col(integer(UserGroup::UserId))
                    .col(integer(UserGroup::GroupTypeId))
                    .col(string(UserGroup::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_GROUP_USER_ID)
                            .from(UserGroup::Table, UserGroup::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_GROUP_GROUP_TYPE_ID)
                            .from(UserGroup::Table, UserGroup::GroupTypeId)
                            .to(GroupType::Table, GroupType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_GROUP_USER_TYPE_NAME)
                    .table(UserGroup::Table)
                    .col(UserGroup::UserId)
                    .col(UserGroup::GroupTypeId)
                    .col(UserGroup::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupMember::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupMember::Id))
                    .col(integer(GroupMember::GroupId))
                    .col(integer(GroupMember::UserId))
                    .col(integer(GroupMember::UserRoleId))
                    .col(boolean(GroupMember::Active).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_MEMBER_GROUP_ID)
                            .from(GroupMember::Table, GroupMember::GroupId)
                            .to(UserGroup::Table, UserGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_MEMBER_USER_ID)
                            .from(GroupMember::Table, GroupMember::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_MEMBER_USER_ROLE_ID)
                            .from(GroupMember::Table, GroupMember::UserRoleId)
                            .to(UserRole::Table, UserRole::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_MEMBER_GROUP_USER)
                    .table(GroupMember::Table)
                    .col(GroupMember::GroupId)
                    .col(GroupMember::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupInvite::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupInvite::Id))
                    .col(integer(GroupInvite::GroupId))
                    .col(string(GroupInvite::InviteEmail))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GROUP_INVITE_GROUP_ID)
                            .from(GroupInvite::Table, GroupInvite::GroupId)
                            .to(UserGroup::Table, UserGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GROUP_INVITE_GROUP_EMAIL)
                    .table(GroupInvite::Table)
                    .col(GroupInvite::GroupId)
                    .col(GroupInvite::InviteEmail)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupInvite::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupMember::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserGroup {
    Table,
    Id,
    UserId,
    GroupTypeId,
    Name,
}

#[derive(DeriveIden)]
enum GroupMember {
    Table,
    Id,
    GroupId,
    UserId,
    UserRoleId,
    Active,
}

#[derive(DeriveIden)]
enum GroupInvite {
    Table,
    Id,
    GroupId,
    InviteEmail,
}
