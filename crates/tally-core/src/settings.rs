//! ClickHouse cluster and replication settings.
//!
//! Read once at startup (file, environment, then command line) and handed to
//! the ClickHouse querier, which never looks at the process environment itself.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable naming the ClickHouse cluster
pub const ENV_CLUSTER: &str = "CLICKHOUSE_CLUSTER";
/// Environment variable holding the ZooKeeper path template
pub const ENV_ZOOKEEPER_PATH: &str = "CLICKHOUSE_ZOOKEEPER_PATH";
/// Environment variable holding the replica name template
pub const ENV_REPLICA_NAME: &str = "CLICKHOUSE_REPLICA_NAME";
/// Environment variable holding the insert quorum
pub const ENV_INSERT_QUORUM: &str = "CLICKHOUSE_INSERT_QUORUM";

/// Write quorum required for bookkeeping inserts on a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "QuorumRepr", into = "String")]
pub enum InsertQuorum {
    /// Let the server pick a majority of replicas
    #[default]
    Auto,
    /// Explicit number of replicas that must acknowledge the write
    Replicas(u64),
}

impl fmt::Display for InsertQuorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertQuorum::Auto => write!(f, "auto"),
            InsertQuorum::Replicas(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for InsertQuorum {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(InsertQuorum::Auto);
        }
        trimmed
            .parse::<u64>()
            .map(InsertQuorum::Replicas)
            .map_err(|_| CoreError::InvalidInsertQuorum {
                value: s.to_string(),
            })
    }
}

/// YAML may spell the quorum as `auto`, `"2"` or `2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuorumRepr {
    Count(u64),
    Text(String),
}

impl TryFrom<QuorumRepr> for InsertQuorum {
    type Error = CoreError;

    fn try_from(repr: QuorumRepr) -> Result<Self, Self::Error> {
        match repr {
            QuorumRepr::Count(n) => Ok(InsertQuorum::Replicas(n)),
            QuorumRepr::Text(s) => s.parse(),
        }
    }
}

impl From<InsertQuorum> for String {
    fn from(q: InsertQuorum) -> Self {
        q.to_string()
    }
}

/// Cluster, replication and write-consistency settings for ClickHouse.
///
/// A cluster name switches on distributed behavior. The ZooKeeper path and
/// replica name only take effect when both are set and a cluster is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClickHouseSettings {
    /// Cluster name used in `ON CLUSTER` clauses
    #[serde(default)]
    pub cluster: Option<String>,

    /// Coordination path for `ReplicatedMergeTree`
    #[serde(default)]
    pub zookeeper_path: Option<String>,

    /// Replica identity for `ReplicatedMergeTree`
    #[serde(default)]
    pub replica: Option<String>,

    /// Insert quorum applied when a cluster is configured
    #[serde(default)]
    pub insert_quorum: InsertQuorum,
}

impl ClickHouseSettings {
    /// Layer `overrides` on top of `self`: every value it sets wins.
    pub fn overlay(mut self, overrides: ClickHouseOverrides) -> Self {
        if let Some(cluster) = non_empty(overrides.cluster) {
            self.cluster = Some(cluster);
        }
        if let Some(path) = non_empty(overrides.zookeeper_path) {
            self.zookeeper_path = Some(path);
        }
        if let Some(replica) = non_empty(overrides.replica) {
            self.replica = Some(replica);
        }
        if let Some(quorum) = overrides.insert_quorum {
            self.insert_quorum = quorum;
        }
        self
    }

    /// Drop empty strings so that `Some("")` never reads as configured.
    pub fn normalized(self) -> Self {
        Self {
            cluster: non_empty(self.cluster),
            zookeeper_path: non_empty(self.zookeeper_path),
            replica: non_empty(self.replica),
            insert_quorum: self.insert_quorum,
        }
    }
}

/// One layer of ClickHouse settings (environment or command line).
///
/// `None` leaves the lower layer's value in place, so an explicit `auto` quorum
/// still replaces a count set in tally.yml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickHouseOverrides {
    pub cluster: Option<String>,
    pub zookeeper_path: Option<String>,
    pub replica: Option<String>,
    pub insert_quorum: Option<InsertQuorum>,
}

impl ClickHouseOverrides {
    /// Read the `CLICKHOUSE_*` variables from the process environment.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the `CLICKHOUSE_*` variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let insert_quorum = non_empty(lookup(ENV_INSERT_QUORUM))
            .map(|raw| raw.parse::<InsertQuorum>())
            .transpose()?;
        Ok(Self {
            cluster: non_empty(lookup(ENV_CLUSTER)),
            zookeeper_path: non_empty(lookup(ENV_ZOOKEEPER_PATH)),
            replica: non_empty(lookup(ENV_REPLICA_NAME)),
            insert_quorum,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
