//! Rows read back from the bookkeeping table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One `(version_id, is_applied)` row, as returned by the list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Migration ordinal
    pub version_id: i64,
    /// Whether this row records a forward application
    pub is_applied: bool,
}

/// Most recent state of a single version, as returned by the by-version query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationState {
    /// When the authoritative row was written
    pub timestamp: NaiveDateTime,
    /// Whether the version is currently applied
    pub is_applied: bool,
}
