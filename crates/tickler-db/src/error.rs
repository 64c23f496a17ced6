use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Connection error: {0}")]
    ConnectionError(#[from] diesel::ConnectionError),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Blocking task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error(transparent)]
    CoreError(#[from] tickler_core::error::CoreError),
}

impl DbError {
    /// Whether the error means the requested row does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::DatabaseError(diesel::result::Error::NotFound))
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
