use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No accounts configured")]
    NoAccounts,
    #[error("Invalid credential material: {0}")]
    InvalidCredential(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Cannot connect to database: {0}")]
    ConnectionError(#[from] diesel::result::ConnectionError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
