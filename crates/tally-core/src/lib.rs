//! tally-core - Core library for tally
//!
//! This crate provides the shared types used across all tally components:
//! the dialect selector, project configuration, ClickHouse cluster settings,
//! the validated bookkeeping table name, and the rows read back from the
//! bookkeeping table.

pub mod config;
pub mod error;
pub mod record;
pub mod settings;
pub mod table_name;

pub use config::{Config, DatabaseConfig, Dialect};
pub use error::CoreError;
pub use record::{MigrationRecord, MigrationState};
pub use settings::{ClickHouseOverrides, ClickHouseSettings, InsertQuorum};
pub use table_name::TableName;
