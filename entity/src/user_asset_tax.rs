use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_asset_tax")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_asset_id: i32,
    pub tax_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub tax_value: Decimal,
    pub paid: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_asset::Entity",
        from = "Column::UserAssetId",
        to = "super::user_asset::Column::Id",
        on_delete = "Cascade"
    )]
    UserAsset,
    #[sea_orm(
        belongs_to = "super::tax::Entity",
        from = "Column::TaxId",
        to = "super::tax::Column::Id"
    )]
    Tax,
}

impl Related<super::user_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAsset.def()
    }
}

impl Related<super::tax::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tax.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
