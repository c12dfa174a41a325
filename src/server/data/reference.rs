//! Lookup tables.
//!
//! All lookup tables share the `{id, name}` shape, so every operation dispatches on
//! [`LookupTable`] to the matching entity through `lookup_table!`.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::reference::LookupTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceRow {
    pub id: i32,
    pub name: String,
}

macro_rules! lookup_table {
    ($table:expr, $module:ident => $body:expr) => {{
        match $table {
            LookupTable::AssetType => {
                use entity::asset_type as $module;
                $body
            }
            LookupTable::IncomeType => {
                use entity::income_type as $module;
                $body
            }
            LookupTable::ExpenditureType => {
                use entity::expenditure_type as $module;
                $body
            }
            LookupTable::TaxType => {
                use entity::tax_type as $module;
                $body
            }
            LookupTable::GroupType => {
                use entity::group_type as $module;
                $body
            }
            LookupTable::FileType => {
                use entity::file_type as $module;
                $body
            }
            LookupTable::Currency => {
                use entity::currency as $module;
                $body
            }
            LookupTable::Recurrency => {
                use entity::recurrency as $module;
                $body
            }
        }
    }};
}

pub struct ReferenceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReferenceRepository<'a, C> {
    /// Creates a new instance of [`ReferenceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn list(&self, table: LookupTable) -> Result<Vec<ReferenceRow>, DbErr> {
        lookup_table!(table, lookup => {
            let rows = lookup::Entity::find()
                .order_by_asc(lookup::Column::Id)
                .all(self.db)
                .await?;

            Ok(rows
                .into_iter()
                .map(|row| ReferenceRow { id: row.id, name: row.name })
                .collect())
        })
    }

    pub async fn find_by_name(
        &self,
        table: LookupTable,
        name: &str,
    ) -> Result<Option<ReferenceRow>, DbErr> {
        lookup_table!(table, lookup => {
            let row = lookup::Entity::find()
                .filter(lookup::Column::Name.eq(name))
                .one(self.db)
                .await?;

            Ok(row.map(|row| ReferenceRow { id: row.id, name: row.name }))
        })
    }

    pub async fn create(&self, table: LookupTable, name: &str) -> Result<ReferenceRow, DbErr> {
        lookup_table!(table, lookup => {
            let row = lookup::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            Ok(ReferenceRow { id: row.id, name: row.name })
        })
    }

    /// Inserts the row unless one with the same name exists
    pub async fn ensure(&self, table: LookupTable, name: &str) -> Result<ReferenceRow, DbErr> {
        match self.find_by_name(table, name).await? {
            Some(row) => Ok(row),
            None => self.create(table, name).await,
        }
    }

    pub async fn delete(&self, table: LookupTable, id: i32) -> Result<DeleteResult, DbErr> {
        lookup_table!(table, lookup => {
            lookup::Entity::delete_by_id(id).exec(self.db).await
        })
    }
}
