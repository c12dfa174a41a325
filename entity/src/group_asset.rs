use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "group_asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: i32,
    pub user_asset_id: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub owning_percentage: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_group::Entity",
        from = "Column::GroupId",
        to = "super::user_group::Column::Id"
    )]
    UserGroup,
    #[sea_orm(
        belongs_to = "super::user_asset::Entity",
        from = "Column::UserAssetId",
        to = "super::user_asset::Column::Id"
    )]
    UserAsset,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserGroup.def()
    }
}

impl Related<super::user_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAsset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
