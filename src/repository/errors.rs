use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::pagination::PaginationError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error during {operation}: {message}")]
    DatabaseError {
        operation: &'static str,
        message: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Deadline exceeded before {operation}")]
    Timeout { operation: &'static str },

    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Classifies a Diesel error raised while running `operation`.
    pub fn from_diesel(err: DieselError, operation: &'static str) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => RepositoryError::ConstraintViolation(
                        format!("Unique constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::ConstraintViolation(
                        format!("Foreign key constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::NotNullViolation => RepositoryError::ConstraintViolation(
                        format!("Not null constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::CheckViolation => RepositoryError::ConstraintViolation(
                        format!("Check constraint violation: {message}"),
                    ),
                    _ => RepositoryError::DatabaseError { operation, message },
                }
            }

            DieselError::DeserializationError(e) => RepositoryError::DatabaseError {
                operation,
                message: format!("Deserialization error: {e}"),
            },

            DieselError::SerializationError(e) => RepositoryError::DatabaseError {
                operation,
                message: format!("Serialization error: {e}"),
            },

            DieselError::QueryBuilderError(e) => RepositoryError::DatabaseError {
                operation,
                message: format!("Query builder error: {e}"),
            },

            DieselError::InvalidCString(_) => {
                RepositoryError::ValidationError("Invalid C string".to_string())
            }

            DieselError::RollbackTransaction => RepositoryError::DatabaseError {
                operation,
                message: "Transaction rollback".to_string(),
            },

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

/// Attaches an operation name to Diesel failures.
pub trait DuringOperation<T> {
    fn during(self, operation: &'static str) -> RepositoryResult<T>;
}

impl<T> DuringOperation<T> for Result<T, DieselError> {
    fn during(self, operation: &'static str) -> RepositoryResult<T> {
        self.map_err(|err| RepositoryError::from_diesel(err, operation))
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        RepositoryError::from_diesel(err, "query")
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}
