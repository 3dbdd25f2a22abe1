//! DuckDB version store implementation

use crate::error::{StoreError, StoreResult};
use crate::traits::VersionStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use duckdb::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tally_core::{Dialect, MigrationRecord, MigrationState, TableName};
use tally_dialect::Querier;

/// Version store backed by an embedded DuckDB database
pub struct DuckDbStore {
    conn: Mutex<Connection>,
    querier: Box<dyn Querier>,
    table: TableName,
}

impl DuckDbStore {
    /// Wrap an open connection.
    ///
    /// Fails when `querier` writes SQL for a backend other than DuckDB.
    pub fn new(conn: Connection, querier: Box<dyn Querier>, table: TableName) -> StoreResult<Self> {
        if querier.dialect() != Dialect::DuckDb {
            return Err(StoreError::DialectMismatch {
                store: "duckdb".to_string(),
                dialect: querier.dialect().to_string(),
            });
        }
        Ok(Self {
            conn: Mutex::new(conn),
            querier,
            table,
        })
    }

    /// Create a store over a new in-memory database
    pub fn in_memory(querier: Box<dyn Querier>, table: TableName) -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Self::new(conn, querier, table)
    }

    /// Open a store from a path string (handles the :memory: special case)
    pub fn open(path: &str, querier: Box<dyn Querier>, table: TableName) -> StoreResult<Self> {
        if path == ":memory:" {
            return Self::in_memory(querier, table);
        }
        let conn = Connection::open(Path::new(path))
            .map_err(|e| StoreError::ConnectionError(format!("{}: {}", e, path)))?;
        Self::new(conn, querier, table)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::MutexPoisoned(e.to_string()))
    }

    fn create_version_table_sync(&self) -> StoreResult<()> {
        let sql = self.querier.create_table(&self.table);
        let conn = self.lock()?;
        conn.execute_batch(&sql)
            .map_err(|e| StoreError::execution(e, &sql))
    }

    fn insert_version_sync(&self, version_id: i64, is_applied: bool) -> StoreResult<()> {
        let sql = self.querier.insert_version(&self.table);
        let conn = self.lock()?;
        conn.execute(&sql, params![version_id, is_applied])
            .map_err(|e| StoreError::execution(e, &sql))?;
        Ok(())
    }

    fn delete_version_sync(&self, version_id: i64) -> StoreResult<()> {
        let sql = self.querier.delete_version(&self.table);
        let conn = self.lock()?;
        let deleted = conn
            .execute(&sql, params![version_id])
            .map_err(|e| StoreError::execution(e, &sql))?;
        log::debug!("Deleted {} record(s) of version {}", deleted, version_id);
        Ok(())
    }

    fn get_migration_sync(&self, version_id: i64) -> StoreResult<Option<MigrationState>> {
        let sql = self.querier.get_migration_by_version(&self.table);
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::execution(e, &sql))?;
        let mut rows = stmt
            .query(params![version_id])
            .map_err(|e| StoreError::execution(e, &sql))?;

        let Some(row) = rows.next().map_err(|e| StoreError::execution(e, &sql))? else {
            return Ok(None);
        };
        let timestamp: NaiveDateTime = row.get(0).map_err(|e| StoreError::execution(e, &sql))?;
        let is_applied: bool = row.get(1).map_err(|e| StoreError::execution(e, &sql))?;
        Ok(Some(MigrationState {
            timestamp,
            is_applied,
        }))
    }

    fn list_migrations_sync(&self) -> StoreResult<Vec<MigrationRecord>> {
        let sql = self.querier.list_migrations(&self.table);
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::execution(e, &sql))?;
        let records = stmt
            .query_map([], |row| {
                Ok(MigrationRecord {
                    version_id: row.get(0)?,
                    is_applied: row.get(1)?,
                })
            })
            .map_err(|e| StoreError::execution(e, &sql))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::execution(e, &sql))?;
        Ok(records)
    }

    fn latest_version_sync(&self) -> StoreResult<Option<i64>> {
        let sql = self.querier.get_latest_version(&self.table);
        let conn = self.lock()?;
        conn.query_row(&sql, [], |row| row.get::<_, Option<i64>>(0))
            .map_err(|e| StoreError::execution(e, &sql))
    }
}

#[async_trait]
impl VersionStore for DuckDbStore {
    fn table(&self) -> &TableName {
        &self.table
    }

    async fn create_version_table(&self) -> StoreResult<()> {
        self.create_version_table_sync()
    }

    async fn insert_version(&self, version_id: i64, is_applied: bool) -> StoreResult<()> {
        self.insert_version_sync(version_id, is_applied)
    }

    async fn delete_version(&self, version_id: i64) -> StoreResult<()> {
        self.delete_version_sync(version_id)
    }

    async fn get_migration(&self, version_id: i64) -> StoreResult<Option<MigrationState>> {
        self.get_migration_sync(version_id)
    }

    async fn list_migrations(&self) -> StoreResult<Vec<MigrationRecord>> {
        self.list_migrations_sync()
    }

    async fn latest_version(&self) -> StoreResult<Option<i64>> {
        self.latest_version_sync()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
