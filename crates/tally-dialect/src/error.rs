//! Error types for tally-dialect

use thiserror::Error;

/// Errors raised while checking generated SQL
#[derive(Error, Debug)]
pub enum DialectError {
    /// SQL syntax error (D001)
    #[error("[D001] {dialect} SQL syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        dialect: String,
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (D002)
    #[error("[D002] SQL is empty")]
    EmptySql,

    /// Wrong number of statements (D003)
    #[error("[D003] Expected exactly one statement, found {0}")]
    StatementCount(usize),
}

/// Result type alias for DialectError
pub type DialectResult<T> = Result<T, DialectError>;
