use salvo::http::StatusCode;
use thiserror::Error;
use tickler_db::error::DbError;
use tickler_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    RuleError(#[from] tickler_rule::RuleError),

    #[error(transparent)]
    CoreError(#[from] tickler_core::error::CoreError),

    #[error("{0}")]
    BadRequest(String),
}

const fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    /// ## Summary
    /// Maps the error to the status code the API answers with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::RuleError(_)
            | Self::ServiceError(ServiceError::ValidationError(_) | ServiceError::RuleError(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
            Self::ServiceError(ServiceError::DatabaseError(err)) | Self::DatabaseError(err) => {
                db_status(err)
            }
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// Returns the message shown to clients. Server-side failures are not described.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::SERVICE_UNAVAILABLE => "Database unavailable".to_string(),
            status if status.is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
