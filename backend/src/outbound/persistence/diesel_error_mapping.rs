//! Shared Diesel error classification for the blog repositories.

use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// Any other query failure.
    Query(&'static str),
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Log and classify a Diesel error.
pub(crate) fn classify(error: diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        _ => DieselFailure::Query("database error"),
    }
}

/// Convert a row count or window bound for a `LIMIT`/`OFFSET` clause.
pub(crate) fn to_sql_bound(value: usize) -> Result<i64, DieselFailure> {
    i64::try_from(value).map_err(|_| DieselFailure::Query("pagination bound out of range"))
}

/// Convert a `COUNT(*)` result into a collection size.
pub(crate) fn from_sql_count(value: i64) -> Result<usize, DieselFailure> {
    usize::try_from(value).map_err(|_| DieselFailure::Query("negative row count"))
}
