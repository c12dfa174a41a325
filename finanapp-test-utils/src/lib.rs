//! Test harness for the finanapp workspace.
//!
//! Provides an in-memory SQLite [`TestSetup`], fixtures for inserting rows and a
//! declarative [`TestBuilder`].

pub mod builder;
pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use error::TestError;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{
        constant::{TEST_JWT_SECRET, TEST_PASSWORD},
        test_setup_with_reference_data, test_setup_with_schema, test_setup_with_tables,
        TestBuilder, TestError, TestSetup,
    };
}
