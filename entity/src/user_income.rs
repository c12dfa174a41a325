use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_income")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub income_type_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub value: Decimal,
    pub recurrence: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub shared: bool,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub owning_percentage: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::income_type::Entity",
        from = "Column::IncomeTypeId",
        to = "super::income_type::Column::Id"
    )]
    IncomeType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::income_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
