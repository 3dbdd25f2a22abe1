//! Error types for tally-store

use thiserror::Error;

/// Version store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection error (S001)
    #[error("[S001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (S002)
    #[error("[S002] Bookkeeping statement failed: {message}\n{sql}")]
    ExecutionError { message: String, sql: String },

    /// Querier dialect cannot run on this store (S003)
    #[error("[S003] {store} cannot execute {dialect} statements")]
    DialectMismatch { store: String, dialect: String },

    /// Mutex poisoned (S004)
    #[error("[S004] Store mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub(crate) fn execution(err: impl std::fmt::Display, sql: &str) -> Self {
        StoreError::ExecutionError {
            message: err.to_string(),
            sql: sql.to_string(),
        }
    }
}
