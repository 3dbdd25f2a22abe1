//! tally-store - Version store for tally
//!
//! This crate provides the `VersionStore` trait, which runs a dialect
//! querier's bookkeeping SQL against a live connection, and an embedded DuckDB
//! implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbStore;
pub use error::StoreError;
pub use traits::VersionStore;
