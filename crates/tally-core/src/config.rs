//! Configuration types and parsing for tally.yml

use crate::error::{CoreError, CoreResult};
use crate::settings::ClickHouseSettings;
use crate::table_name::TableName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File names tried by [`Config::load_or_default`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &["tally.yml", "tally.yaml"];

/// Project configuration from tally.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend whose SQL dialect the bookkeeping statements are written in
    #[serde(default)]
    pub dialect: Dialect,

    /// Bookkeeping table name
    #[serde(default)]
    pub table: TableName,

    /// Database the built-in store connects to
    #[serde(default)]
    pub database: DatabaseConfig,

    /// ClickHouse cluster and replication settings
    #[serde(default)]
    pub clickhouse: ClickHouseSettings,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let parse_error = |e: serde_yaml::Error| CoreError::ConfigParseError {
            message: e.to_string(),
        };
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
        if let Some(table) = value.get("table").and_then(serde_yaml::Value::as_str) {
            TableName::try_new(table).map_err(|e| CoreError::ConfigInvalid {
                message: e.to_string(),
            })?;
        }
        let mut config: Config = serde_yaml::from_value(value).map_err(parse_error)?;
        config.clickhouse = std::mem::take(&mut config.clickhouse).normalized();
        Ok(config)
    }

    /// Load `tally.yml` (or `tally.yaml`) from `dir`, falling back to defaults
    /// when neither exists.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                log::debug!("Loading config from {}", candidate.display());
                return Self::load(&candidate);
            }
        }
        log::debug!("No tally config in {}, using defaults", dir.display());
        Ok(Self::default())
    }
}

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL (default)
    #[default]
    #[serde(alias = "pgx", alias = "postgresql")]
    Postgres,
    /// MySQL / MariaDB
    MySql,
    /// SQLite 3
    #[serde(alias = "sqlite")]
    Sqlite3,
    /// Microsoft SQL Server
    #[serde(alias = "sqlserver", alias = "azuresql")]
    MsSql,
    /// Amazon Redshift
    Redshift,
    /// TiDB
    TiDb,
    /// Vertica
    Vertica,
    /// DuckDB
    DuckDb,
    /// ClickHouse, optionally clustered and replicated
    ClickHouse,
}

impl Dialect {
    /// Every supported dialect, in display order
    pub const ALL: [Dialect; 9] = [
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Sqlite3,
        Dialect::MsSql,
        Dialect::Redshift,
        Dialect::TiDb,
        Dialect::Vertica,
        Dialect::DuckDb,
        Dialect::ClickHouse,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite3 => "sqlite3",
            Dialect::MsSql => "mssql",
            Dialect::Redshift => "redshift",
            Dialect::TiDb => "tidb",
            Dialect::Vertica => "vertica",
            Dialect::DuckDb => "duckdb",
            Dialect::ClickHouse => "clickhouse",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pgx" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite3" | "sqlite" => Ok(Dialect::Sqlite3),
            "mssql" | "sqlserver" | "azuresql" => Ok(Dialect::MsSql),
            "redshift" => Ok(Dialect::Redshift),
            "tidb" => Ok(Dialect::TiDb),
            "vertica" => Ok(Dialect::Vertica),
            "duckdb" => Ok(Dialect::DuckDb),
            "clickhouse" => Ok(Dialect::ClickHouse),
            other => Err(CoreError::UnknownDialect {
                name: other.to_string(),
                expected: Dialect::ALL
                    .iter()
                    .map(Dialect::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
