//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use tally_dialect::Operation;

/// tally - inspect and maintain the migration bookkeeping table
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory searched for tally.yml
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Explicit config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override SQL dialect
    #[arg(short, long, global = true, env = "TALLY_DIALECT")]
    pub dialect: Option<String>,

    /// Override bookkeeping table name
    #[arg(short, long, global = true, env = "TALLY_TABLE")]
    pub table: Option<String>,

    /// Override database path (DuckDB file or :memory:)
    #[arg(long, global = true, env = "TALLY_DATABASE")]
    pub database: Option<String>,

    /// ClickHouse cluster name
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// ClickHouse ZooKeeper path for ReplicatedMergeTree
    #[arg(long, global = true)]
    pub zookeeper_path: Option<String>,

    /// ClickHouse replica name for ReplicatedMergeTree
    #[arg(long, global = true)]
    pub replica: Option<String>,

    /// ClickHouse insert quorum ("auto" or a replica count)
    #[arg(long, global = true)]
    pub insert_quorum: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the bookkeeping SQL for the configured dialect
    Sql(SqlArgs),

    /// Create the bookkeeping table
    Init,

    /// Show the recorded state of every version
    Status(StatusArgs),

    /// Print the highest recorded version
    Version,

    /// Record a version as applied (or rolled back with --down)
    Mark(MarkArgs),

    /// Delete every record of a version
    Forget(ForgetArgs),
}

/// Arguments for the sql command
#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Operations to render (default: all)
    #[arg(value_enum)]
    pub operations: Vec<SqlOperation>,

    /// Parse each statement and fail on syntax errors
    #[arg(long)]
    pub check: bool,
}

/// Bookkeeping operations selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperation {
    CreateTable,
    InsertVersion,
    DeleteVersion,
    GetMigrationByVersion,
    ListMigrations,
    GetLatestVersion,
}

impl From<SqlOperation> for Operation {
    fn from(op: SqlOperation) -> Self {
        match op {
            SqlOperation::CreateTable => Operation::CreateTable,
            SqlOperation::InsertVersion => Operation::InsertVersion,
            SqlOperation::DeleteVersion => Operation::DeleteVersion,
            SqlOperation::GetMigrationByVersion => Operation::GetMigrationByVersion,
            SqlOperation::ListMigrations => Operation::ListMigrations,
            SqlOperation::GetLatestVersion => Operation::GetLatestVersion,
        }
    }
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
}

/// Arguments for the mark command
#[derive(Args, Debug)]
pub struct MarkArgs {
    /// Migration version
    #[arg(allow_negative_numbers = true)]
    pub version: i64,

    /// Record the version as not applied
    #[arg(long)]
    pub down: bool,
}

/// Arguments for the forget command
#[derive(Args, Debug)]
pub struct ForgetArgs {
    /// Migration version
    #[arg(allow_negative_numbers = true)]
    pub version: i64,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
