//! Microsoft SQL Server querier

use crate::querier::Querier;
use tally_core::Dialect;

/// SQL Server bookkeeping SQL (`@pN` placeholders).
///
/// T-SQL has no `CREATE TABLE IF NOT EXISTS`, so creation is guarded by an
/// `OBJECT_ID` lookup, and `TOP 1` stands in for `LIMIT 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSql;

impl Querier for MsSql {
    fn dialect(&self) -> Dialect {
        Dialect::MsSql
    }

    fn create_table(&self, table: &str) -> String {
        format!(
            "IF OBJECT_ID(N'{table}', N'U') IS NULL
CREATE TABLE {table} (
    id INT NOT NULL IDENTITY(1,1) PRIMARY KEY,
    version_id BIGINT NOT NULL,
    is_applied BIT NOT NULL,
    tstamp DATETIME NULL DEFAULT CURRENT_TIMESTAMP
)"
        )
    }

    fn insert_version(&self, table: &str) -> String {
        format!("INSERT INTO {table} (version_id, is_applied) VALUES (@p1, @p2)")
    }

    fn delete_version(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE version_id = @p1")
    }

    fn get_migration_by_version(&self, table: &str) -> String {
        format!(
            "SELECT TOP 1 tstamp, is_applied FROM {table} WHERE version_id = @p1 ORDER BY tstamp DESC"
        )
    }

    fn list_migrations(&self, table: &str) -> String {
        format!("SELECT version_id, is_applied FROM {table} ORDER BY version_id DESC")
    }

    fn get_latest_version(&self, table: &str) -> String {
        format!("SELECT max(version_id) FROM {table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_guarded_by_object_id() {
        let sql = MsSql.create_table("dbo.goose_db_version");
        assert!(sql.starts_with("IF OBJECT_ID(N'dbo.goose_db_version', N'U') IS NULL"));
        assert!(sql.contains("CREATE TABLE dbo.goose_db_version ("));
        assert!(!sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn test_lookup_uses_top_instead_of_limit() {
        let sql = MsSql.get_migration_by_version("t");
        assert!(sql.starts_with("SELECT TOP 1 tstamp, is_applied"));
        assert!(!sql.contains("LIMIT"));
        assert!(sql.contains("@p1"));
    }

    #[test]
    fn test_insert_uses_named_positional_parameters() {
        assert_eq!(
            MsSql.insert_version("t"),
            "INSERT INTO t (version_id, is_applied) VALUES (@p1, @p2)"
        );
    }
}
