//! Declarative test setup.
//!
//! Configuration methods queue work which runs in order during [`TestBuilder::build`]:
//! schema, reference data, then users.

use crate::{error::TestError, TestSetup};

/// Builder for a [`TestSetup`] with tables and fixture rows in place.
///
/// ```no_run
/// use finanapp_test_utils::TestBuilder;
///
/// # async fn example() -> Result<(), finanapp_test_utils::TestError> {
/// let test = TestBuilder::new()
///     .with_reference_data()
///     .with_user("ana@example.com")
///     .build()
///     .await?;
/// let ana = test.user().get_by_email("ana@example.com").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct TestBuilder {
    schema: bool,
    reference_data: bool,
    users: Vec<String>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all migrations during `build()`.
    pub fn with_schema(mut self) -> Self {
        self.schema = true;
        self
    }

    /// Run all migrations and insert the default lookup rows.
    pub fn with_reference_data(mut self) -> Self {
        self.schema = true;
        self.reference_data = true;
        self
    }

    /// Insert an active user with the fixture password. Requires reference data.
    pub fn with_user(mut self, email: &str) -> Self {
        self.users.push(email.to_string());
        self
    }

    pub async fn build(self) -> Result<TestSetup, TestError> {
        let setup = TestSetup::new().await?;

        if self.schema {
            setup.with_schema().await?;
        }

        if self.reference_data {
            setup.reference().insert_defaults().await?;
        }

        for email in &self.users {
            setup.user().insert_user(email).await?;
        }

        Ok(setup)
    }
}
