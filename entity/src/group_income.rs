use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "group_income")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: i32,
    pub user_income_id: i32,
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
        belongs_to = "super::user_income::Entity",
        from = "Column::UserIncomeId",
        to = "super::user_income::Column::Id"
    )]
    UserIncome,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserGroup.def()
    }
}

impl Related<super::user_income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserIncome.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
