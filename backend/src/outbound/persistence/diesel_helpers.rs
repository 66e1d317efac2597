//! Shared helpers for the Diesel repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Whether a Diesel error is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Run a blocking Diesel closure on the blocking thread pool.
///
/// Join failures (a panicking or cancelled task) are reported through
/// `to_error` so callers keep one error type.
pub(crate) async fn run_blocking<T, E, F>(to_error: fn(String) -> E, op: F) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| to_error(format!("blocking task failed: {err}")))?
}
