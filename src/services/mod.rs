//! Service layer sitting between HTTP handlers and repositories.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::pagination::PaginationError;
use crate::repository::errors::RepositoryError;

pub mod entries;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A numeric query parameter could not be parsed.
    #[error("bad query parameter: {0}")]
    Parse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    /// The request deadline elapsed before the store answered.
    #[error("request timed out")]
    RequestTimeout,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Timeout { .. } => ServiceError::RequestTimeout,
            RepositoryError::ValidationError(msg) | RepositoryError::ConstraintViolation(msg) => {
                ServiceError::Validation(msg)
            }
            RepositoryError::Pagination(e) => ServiceError::from(e),
            other => ServiceError::Storage(other.to_string()),
        }
    }
}

impl From<PaginationError> for ServiceError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::InvalidPage(_) | PaginationError::InvalidLimit(_) => {
                ServiceError::Parse(err.to_string())
            }
            PaginationError::ZeroLimit => ServiceError::Configuration(err.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
