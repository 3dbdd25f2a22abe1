//! Version store trait definition

use crate::error::StoreResult;
use async_trait::async_trait;
use tally_core::{MigrationRecord, MigrationState, TableName};

/// Reads and writes migration state through a dialect querier.
///
/// Failures are returned to the caller as-is. A bookkeeping error must never
/// be retried or swallowed, or a version could be applied twice or lost.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Bookkeeping table this store maintains
    fn table(&self) -> &TableName;

    /// Create the bookkeeping table if it does not exist
    async fn create_version_table(&self) -> StoreResult<()>;

    /// Record one application event for `version_id`
    async fn insert_version(&self, version_id: i64, is_applied: bool) -> StoreResult<()>;

    /// Remove every record of `version_id`
    async fn delete_version(&self, version_id: i64) -> StoreResult<()>;

    /// Latest record of `version_id`, or `None` if it was never recorded
    async fn get_migration(&self, version_id: i64) -> StoreResult<Option<MigrationState>>;

    /// All records, highest version first
    async fn list_migrations(&self) -> StoreResult<Vec<MigrationRecord>>;

    /// Highest recorded version, or `None` when nothing has been recorded yet
    async fn latest_version(&self) -> StoreResult<Option<i64>>;

    /// Whether the latest record of `version_id` marks it applied
    async fn is_applied(&self, version_id: i64) -> StoreResult<bool> {
        Ok(self
            .get_migration(version_id)
            .await?
            .is_some_and(|state| state.is_applied))
    }

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
