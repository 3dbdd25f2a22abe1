//! Shared helpers for command implementations

use anyhow::{bail, Context, Result};
use std::path::Path;
use tally_core::{ClickHouseOverrides, Config, Dialect, InsertQuorum, TableName};
use tally_store::{DuckDbStore, VersionStore};

use crate::cli::GlobalArgs;

/// Resolve the effective configuration.
///
/// Layers, lowest precedence first: tally.yml (or `--config`), `CLICKHOUSE_*`
/// environment variables, command-line flags.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load config")?,
        None => Config::load_or_default(Path::new(&global.project_dir))
            .context("Failed to load config")?,
    };

    let env = ClickHouseOverrides::from_env().context("Invalid CLICKHOUSE_* environment")?;
    config.clickhouse = config.clickhouse.overlay(env);

    if let Some(dialect) = &global.dialect {
        config.dialect = dialect.parse::<Dialect>()?;
    }
    if let Some(table) = &global.table {
        config.table = TableName::try_new(table.as_str())?;
    }
    if let Some(path) = &global.database {
        config.database.path = path.clone();
    }

    let flags = ClickHouseOverrides {
        cluster: global.cluster.clone(),
        zookeeper_path: global.zookeeper_path.clone(),
        replica: global.replica.clone(),
        insert_quorum: global
            .insert_quorum
            .as_deref()
            .map(str::parse::<InsertQuorum>)
            .transpose()?,
    };
    config.clickhouse = config.clickhouse.overlay(flags);

    verbose(
        global,
        &format!(
            "dialect={} table={} database={}",
            config.dialect, config.table, config.database.path
        ),
    );
    Ok(config)
}

/// Open the DuckDB store for `config` and make sure the bookkeeping table exists.
pub(crate) async fn open_store(config: &Config, global: &GlobalArgs) -> Result<DuckDbStore> {
    if config.dialect != Dialect::DuckDb {
        bail!(
            "The built-in store only executes duckdb statements (configured dialect: {}). \
             Use `tally sql` to render {} statements for your own runner.",
            config.dialect,
            config.dialect
        );
    }

    let querier = tally_dialect::querier_from_config(config);
    let store = DuckDbStore::open(&config.database.path, querier, config.table.clone())
        .context("Failed to open database")?;

    verbose(global, &format!("Ensuring table {}", store.table()));
    store
        .create_version_table()
        .await
        .context("Failed to create bookkeeping table")?;
    Ok(store)
}

/// Print a `[verbose]` line to stderr when `--verbose` is set
pub(crate) fn verbose(global: &GlobalArgs, message: &str) {
    if global.verbose {
        eprintln!("[verbose] {}", message);
    }
}
