//! Error types for tally-core

use thiserror::Error;

/// Core error type for tally
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Unknown dialect name
    #[error("[C004] Unknown dialect '{name}'. Expected one of: {expected}")]
    UnknownDialect { name: String, expected: String },

    /// C005: Invalid bookkeeping table name
    #[error("[C005] Invalid table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: String },

    /// C006: Invalid insert quorum value
    #[error("[C006] Invalid insert quorum '{value}': expected 'auto' or a replica count")]
    InvalidInsertQuorum { value: String },

    /// C007: IO error
    #[error("[C007] IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
