use migration::{Migrator, MigratorTrait};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// In-memory SQLite database shared by a single test.
pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup { db })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Runs every migration, giving the test the production schema including
    /// foreign keys and composite unique indexes.
    pub async fn with_schema(&self) -> Result<(), TestError> {
        Migrator::up(&self.db, None).await?;

        Ok(())
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        TestSetup::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

#[macro_export]
macro_rules! test_setup_with_schema {
    () => {{
        async {
            let setup = TestSetup::new().await?;
            setup.with_schema().await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};
}

#[macro_export]
macro_rules! test_setup_with_reference_data {
    () => {{
        async {
            let setup = TestSetup::new().await?;
            setup.with_schema().await?;
            setup.reference().insert_defaults().await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};
}
