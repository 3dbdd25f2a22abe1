//! SQLite querier

use crate::querier::Querier;
use tally_core::Dialect;

/// SQLite 3 bookkeeping SQL (`?` placeholders)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite3;

impl Querier for Sqlite3 {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite3
    }

    fn create_table(&self, table: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    version_id INTEGER NOT NULL,
    is_applied INTEGER NOT NULL,
    tstamp TIMESTAMP DEFAULT (datetime('now'))
)"
        )
    }

    fn insert_version(&self, table: &str) -> String {
        format!("INSERT INTO {table} (version_id, is_applied) VALUES (?, ?)")
    }

    fn delete_version(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE version_id = ?")
    }

    fn get_migration_by_version(&self, table: &str) -> String {
        format!(
            "SELECT tstamp, is_applied FROM {table} WHERE version_id = ? ORDER BY tstamp DESC LIMIT 1"
        )
    }

    fn list_migrations(&self, table: &str) -> String {
        format!("SELECT version_id, is_applied FROM {table} ORDER BY version_id DESC")
    }

    fn get_latest_version(&self, table: &str) -> String {
        format!("SELECT max(version_id) FROM {table}")
    }
}
