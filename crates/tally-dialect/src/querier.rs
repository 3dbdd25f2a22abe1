//! The bookkeeping-table contract shared by every backend.

use std::fmt;
use std::str::FromStr;
use tally_core::Dialect;

/// Renders the SQL a migration runner needs to maintain its bookkeeping table.
///
/// Every method is a pure function of the querier's configuration and the
/// table name. Table names are spliced in verbatim and must already be
/// validated (see [`tally_core::TableName`]); values are never interpolated,
/// the write and lookup statements take positional parameters instead.
///
/// Implementations hold no mutable state, so one instance can be shared by any
/// number of threads for the lifetime of the process.
pub trait Querier: Send + Sync {
    /// Backend this querier writes SQL for
    fn dialect(&self) -> Dialect;

    /// DDL creating the bookkeeping table if it does not exist yet.
    ///
    /// Safe to execute on every startup.
    fn create_table(&self, table: &str) -> String;

    /// Insert with two parameters: `version_id`, then `is_applied`.
    fn insert_version(&self, table: &str) -> String;

    /// Delete every row of one version; one parameter, `version_id`.
    fn delete_version(&self, table: &str) -> String;

    /// Latest `(tstamp, is_applied)` row for one version; one parameter,
    /// `version_id`. Returns at most one row.
    fn get_migration_by_version(&self, table: &str) -> String;

    /// All `(version_id, is_applied)` rows, highest version first.
    fn list_migrations(&self, table: &str) -> String;

    /// `max(version_id)`; NULL when the table is empty.
    fn get_latest_version(&self, table: &str) -> String;
}

/// The six bookkeeping operations, for callers that walk them generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTable,
    InsertVersion,
    DeleteVersion,
    GetMigrationByVersion,
    ListMigrations,
    GetLatestVersion,
}

impl Operation {
    /// Every operation, in the order a runner typically needs them
    pub const ALL: [Operation; 6] = [
        Operation::CreateTable,
        Operation::InsertVersion,
        Operation::DeleteVersion,
        Operation::GetMigrationByVersion,
        Operation::ListMigrations,
        Operation::GetLatestVersion,
    ];

    /// Kebab-case name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTable => "create-table",
            Operation::InsertVersion => "insert-version",
            Operation::DeleteVersion => "delete-version",
            Operation::GetMigrationByVersion => "get-migration-by-version",
            Operation::ListMigrations => "list-migrations",
            Operation::GetLatestVersion => "get-latest-version",
        }
    }

    /// Number of positional parameters the rendered statement expects
    pub fn parameter_count(&self) -> usize {
        match self {
            Operation::InsertVersion => 2,
            Operation::DeleteVersion | Operation::GetMigrationByVersion => 1,
            Operation::CreateTable | Operation::ListMigrations | Operation::GetLatestVersion => 0,
        }
    }

    /// Render this operation's statement with `querier`.
    pub fn render(&self, querier: &dyn Querier, table: &str) -> String {
        match self {
            Operation::CreateTable => querier.create_table(table),
            Operation::InsertVersion => querier.insert_version(table),
            Operation::DeleteVersion => querier.delete_version(table),
            Operation::GetMigrationByVersion => querier.get_migration_by_version(table),
            Operation::ListMigrations => querier.list_migrations(table),
            Operation::GetLatestVersion => querier.get_latest_version(table),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == normalized)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

#[cfg(test)]
#[path = "querier_test.rs"]
mod tests;
