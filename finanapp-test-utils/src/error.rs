use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("Test setup failed: {0}")]
    Setup(String),
}
