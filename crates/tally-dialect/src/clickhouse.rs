//! ClickHouse querier with cluster, replication and quorum handling.
//!
//! Three independent decisions are made from the configured settings:
//!
//! * DDL and `ALTER` mutations get `ON CLUSTER <name>` when a cluster is set.
//!   Inserts and selects never do; they reach the table through the cluster.
//! * The storage engine is `MergeTree()` without a cluster, an explicitly
//!   configured `ReplicatedMergeTree(path, replica)` when both parts are set,
//!   and [`DEFAULT_REPLICATED_MERGE_TREE_ENGINE`] otherwise. Its `{shard}`,
//!   `{database}`, `{table}` and `{replica}` segments are server-side macros and
//!   are emitted untouched.
//! * On a cluster, inserts wait for the configured quorum with sequential
//!   consistency and deletes wait for the mutation on every replica. Without a
//!   cluster no consistency settings are emitted.

use crate::querier::Querier;
use tally_core::{ClickHouseSettings, Dialect, InsertQuorum};

/// Engine used on a cluster when no explicit replication path is configured
pub const DEFAULT_REPLICATED_MERGE_TREE_ENGINE: &str =
    "ReplicatedMergeTree('/clickhouse/tables/{shard}/{database}/{table}', '{replica}')";

/// Engine used on a single node
pub const DEFAULT_MERGE_TREE_ENGINE: &str = "MergeTree()";

/// ClickHouse bookkeeping SQL (`$n` placeholders)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickHouse {
    cluster: Option<String>,
    replication: Option<Replication>,
    insert_quorum: InsertQuorum,
}

/// Explicit `ReplicatedMergeTree` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
struct Replication {
    zookeeper_path: String,
    replica: String,
}

impl ClickHouse {
    /// Build a querier from (already layered) settings.
    pub fn new(settings: &ClickHouseSettings) -> Self {
        let settings = settings.clone().normalized();

        let replication = match (settings.zookeeper_path, settings.replica) {
            (Some(zookeeper_path), Some(replica)) => Some(Replication {
                zookeeper_path,
                replica,
            }),
            (Some(_), None) | (None, Some(_)) => {
                log::warn!(
                    "ClickHouse replication needs both a ZooKeeper path and a replica name; \
                     falling back to the default ReplicatedMergeTree template"
                );
                None
            }
            (None, None) => None,
        };

        if settings.cluster.is_none() && replication.is_some() {
            log::debug!("ClickHouse replication settings ignored without a cluster");
        }

        Self {
            cluster: settings.cluster,
            replication,
            insert_quorum: settings.insert_quorum,
        }
    }

    /// Configured cluster name, if any
    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    /// Storage engine clause for the bookkeeping table.
    pub fn table_engine(&self) -> String {
        if self.cluster.is_none() {
            return DEFAULT_MERGE_TREE_ENGINE.to_string();
        }
        match &self.replication {
            Some(r) => format!(
                "ReplicatedMergeTree('{}', '{}')",
                r.zookeeper_path, r.replica
            ),
            None => DEFAULT_REPLICATED_MERGE_TREE_ENGINE.to_string(),
        }
    }

    /// Append `ON CLUSTER` to a DDL or mutation prefix when clustered.
    fn cluster_command(&self, base: String) -> String {
        match &self.cluster {
            Some(cluster) => format!("{base} ON CLUSTER {cluster}"),
            None => base,
        }
    }
}

impl Default for ClickHouse {
    fn default() -> Self {
        Self::new(&ClickHouseSettings::default())
    }
}

impl Querier for ClickHouse {
    fn dialect(&self) -> Dialect {
        Dialect::ClickHouse
    }

    fn create_table(&self, table: &str) -> String {
        let cmd = self.cluster_command(format!("CREATE TABLE IF NOT EXISTS {table}"));
        format!(
            "{cmd} (
    version_id Int64,
    is_applied UInt8,
    date Date DEFAULT now(),
    tstamp DateTime DEFAULT now()
)
ENGINE = {engine}
ORDER BY (date)",
            engine = self.table_engine()
        )
    }

    fn insert_version(&self, table: &str) -> String {
        if self.cluster.is_some() {
            format!(
                "INSERT INTO {table} (version_id, is_applied) \
                 SETTINGS insert_quorum={}, insert_quorum_parallel=0, select_sequential_consistency=1 \
                 VALUES ($1, $2)",
                self.insert_quorum
            )
        } else {
            format!("INSERT INTO {table} (version_id, is_applied) VALUES ($1, $2)")
        }
    }

    fn delete_version(&self, table: &str) -> String {
        let cmd = self.cluster_command(format!("ALTER TABLE {table}"));
        if self.cluster.is_some() {
            format!("{cmd} DELETE WHERE version_id = $1 SETTINGS mutations_sync = 2")
        } else {
            format!("{cmd} DELETE WHERE version_id = $1")
        }
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

#[cfg(test)]
#[path = "clickhouse_test.rs"]
mod tests;
