//! tally-dialect - Dialect queriers for tally
//!
//! Each supported backend gets a [`Querier`] that renders the six statements a
//! migration runner needs to maintain its bookkeeping table. Queriers only
//! build strings; executing them is the caller's business.

pub mod check;
pub mod clickhouse;
pub mod duckdb;
pub mod error;
pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod querier;
pub mod redshift;
pub mod sqlite;
pub mod tidb;
pub mod vertica;

pub use check::{check_operation, check_statement, CheckOutcome};
pub use clickhouse::ClickHouse;
pub use error::DialectError;
pub use querier::{Operation, Querier};

use tally_core::{ClickHouseSettings, Config, Dialect};

/// Build the querier for `dialect`.
///
/// `clickhouse` is only consulted for [`Dialect::ClickHouse`].
pub fn new_querier(dialect: Dialect, clickhouse: &ClickHouseSettings) -> Box<dyn Querier> {
    log::debug!("Selecting {} querier", dialect);
    match dialect {
        Dialect::Postgres => Box::new(postgres::Postgres),
        Dialect::MySql => Box::new(mysql::MySql),
        Dialect::Sqlite3 => Box::new(sqlite::Sqlite3),
        Dialect::MsSql => Box::new(mssql::MsSql),
        Dialect::Redshift => Box::new(redshift::Redshift),
        Dialect::TiDb => Box::new(tidb::TiDb),
        Dialect::Vertica => Box::new(vertica::Vertica),
        Dialect::DuckDb => Box::new(duckdb::DuckDb),
        Dialect::ClickHouse => Box::new(ClickHouse::new(clickhouse)),
    }
}

/// Build the querier named by a loaded project configuration.
pub fn querier_from_config(config: &Config) -> Box<dyn Querier> {
    new_querier(config.dialect, &config.clickhouse)
}
