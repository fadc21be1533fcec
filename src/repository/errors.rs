use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not obtain a connection from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique constraint rejected the write.
    #[error("conflicting record: {0}")]
    Conflict(String),
    /// The backing table has not been created yet (migrations not applied).
    #[error("table `{0}` does not exist")]
    Unprovisioned(String),
    /// A stored row violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(DieselError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            DieselError::DatabaseError(kind, info) => {
                let missing_table = info
                    .message()
                    .strip_prefix("no such table: ")
                    .map(|table| table.trim().to_string());
                match missing_table {
                    Some(table) => Self::Unprovisioned(table),
                    None => Self::Database(DieselError::DatabaseError(kind, info)),
                }
            }
            other => Self::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
