//! Amazon Redshift querier

use crate::querier::Querier;
use tally_core::Dialect;

/// Redshift bookkeeping SQL (`$n` placeholders)
#[derive(Debug, Clone, Copy, Default)]
pub struct Redshift;

impl Querier for Redshift {
    fn dialect(&self) -> Dialect {
        Dialect::Redshift
    }

    fn create_table(&self, table: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
    id integer NOT NULL identity(1, 1),
    version_id bigint NOT NULL,
    is_applied boolean NOT NULL,
    tstamp timestamp NULL default sysdate,
    PRIMARY KEY(id)
)"
        )
    }

    fn insert_version(&self, table: &str) -> String {
        format!("INSERT INTO {table} (version_id, is_applied) VALUES ($1, $2)")
    }

    fn delete_version(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE version_id = $1")
    }

    fn get_migration_by_version(&self, table: &str) -> String {
        format!(
            "SELECT tstamp, is_applied FROM {table} WHERE version_id = $1 ORDER BY tstamp DESC LIMIT 1"
        )
    }

    fn list_migrations(&self, table: &str) -> String {
        format!("SELECT version_id, is_applied FROM {table} ORDER BY version_id DESC")
    }

    fn get_latest_version(&self, table: &str) -> String {
        format!("SELECT max(version_id) FROM {table}")
    }
}
