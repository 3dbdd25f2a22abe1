//! CLI integration tests for the tally binary

use std::path::Path;
use std::process::{Command, Output};

/// Path to the compiled tally binary (resolved at compile time)
fn tally_bin() -> String {
    env!("CARGO_BIN_EXE_tally").to_string()
}

/// Run tally in `dir` with a clean environment for the settings it reads.
fn run_tally(dir: &Path, args: &[&str]) -> Output {
    Command::new(tally_bin())
        .arg("--project-dir")
        .arg(dir)
        .args(args)
        .env_remove("CLICKHOUSE_CLUSTER")
        .env_remove("CLICKHOUSE_ZOOKEEPER_PATH")
        .env_remove("CLICKHOUSE_REPLICA_NAME")
        .env_remove("CLICKHOUSE_INSERT_QUORUM")
        .env_remove("TALLY_DIALECT")
        .env_remove("TALLY_TABLE")
        .env_remove("TALLY_DATABASE")
        .output()
        .expect("Failed to run tally")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "tally failed.\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

/// Write a tally.yml using DuckDB state stored inside `dir`.
fn write_duckdb_project(dir: &Path) {
    let db = dir.join("state.duckdb");
    std::fs::write(
        dir.join("tally.yml"),
        format!(
            "dialect: duckdb\ntable: schema_migrations\ndatabase:\n  path: \"{}\"\n",
            db.display()
        ),
    )
    .unwrap();
}

// ── tally sql ───────────────────────────────────────────────────────────

#[test]
fn test_sql_defaults_to_all_operations() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(dir.path(), &["sql"]);
    assert_success(&output);

    let out = stdout(&output);
    for name in [
        "-- create-table",
        "-- insert-version",
        "-- delete-version",
        "-- get-migration-by-version",
        "-- list-migrations",
        "-- get-latest-version",
    ] {
        assert!(out.contains(name), "missing {name} in:\n{out}");
    }
    assert!(out.contains("CREATE TABLE IF NOT EXISTS goose_db_version"));
}

#[test]
fn test_sql_clickhouse_single_node() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(
        dir.path(),
        &[
            "sql",
            "create-table",
            "--dialect",
            "clickhouse",
            "--table",
            "schema_migrations",
        ],
    );
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("CREATE TABLE IF NOT EXISTS schema_migrations ("));
    assert!(out.contains("ENGINE = MergeTree()"));
    assert!(!out.contains("ON CLUSTER"));
}

#[test]
fn test_sql_clickhouse_cluster_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(
        dir.path(),
        &[
            "sql",
            "--dialect",
            "clickhouse",
            "--cluster",
            "prod",
            "--zookeeper-path",
            "/ch/tables/{shard}/db/t",
            "--replica",
            "{replica}",
        ],
    );
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("ON CLUSTER prod"));
    assert!(out.contains("ReplicatedMergeTree('/ch/tables/{shard}/db/t', '{replica}')"));
    assert!(out.contains("insert_quorum=auto"));
    assert!(out.contains("mutations_sync = 2"));
}

#[test]
fn test_sql_clickhouse_cluster_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(tally_bin())
        .args(["--project-dir"])
        .arg(dir.path())
        .args(["sql", "insert-version", "--dialect", "clickhouse"])
        .env("CLICKHOUSE_CLUSTER", "analytics")
        .env("CLICKHOUSE_INSERT_QUORUM", "2")
        .env_remove("CLICKHOUSE_ZOOKEEPER_PATH")
        .env_remove("CLICKHOUSE_REPLICA_NAME")
        .output()
        .expect("Failed to run tally");
    assert_success(&output);
    assert!(stdout(&output).contains("insert_quorum=2"));
}

#[test]
fn test_sql_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tally.yml"),
        "dialect: clickhouse\nclickhouse:\n  cluster: prod\n",
    )
    .unwrap();
    let output = run_tally(dir.path(), &["sql", "create-table"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("ON CLUSTER prod"));
    assert!(out.contains(
        "ReplicatedMergeTree('/clickhouse/tables/{shard}/{database}/{table}', '{replica}')"
    ));
}

#[test]
fn test_sql_check_postgres() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(dir.path(), &["sql", "--check", "--dialect", "postgres"]);
    assert_success(&output);
}

#[test]
fn test_sql_check_clickhouse_cluster() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(
        dir.path(),
        &[
            "sql",
            "--check",
            "--verbose",
            "--dialect",
            "clickhouse",
            "--cluster",
            "prod",
        ],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("ON CLUSTER prod"));
    let err = stderr(&output);
    assert!(err.contains("Checked create-table"), "stderr: {err}");
    assert!(err.contains("Skipped check of delete-version"), "stderr: {err}");
}

#[test]
fn test_sql_check_every_dialect() {
    let dir = tempfile::tempdir().unwrap();
    for dialect in [
        "postgres",
        "mysql",
        "sqlite3",
        "mssql",
        "redshift",
        "tidb",
        "vertica",
        "duckdb",
        "clickhouse",
    ] {
        let output = run_tally(dir.path(), &["sql", "--check", "--dialect", dialect]);
        assert!(
            output.status.success(),
            "{dialect} --check failed: {}",
            stderr(&output)
        );
    }
}

#[test]
fn test_sql_env_auto_quorum_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tally.yml"),
        "dialect: clickhouse\nclickhouse:\n  cluster: prod\n  insert_quorum: 2\n",
    )
    .unwrap();

    let output = run_tally(dir.path(), &["sql", "insert-version"]);
    assert_success(&output);
    assert!(stdout(&output).contains("insert_quorum=2,"));

    let output = Command::new(tally_bin())
        .arg("--project-dir")
        .arg(dir.path())
        .args(["sql", "insert-version"])
        .env("CLICKHOUSE_INSERT_QUORUM", "auto")
        .env_remove("CLICKHOUSE_CLUSTER")
        .env_remove("TALLY_DIALECT")
        .output()
        .expect("Failed to run tally");
    assert_success(&output);
    assert!(stdout(&output).contains("insert_quorum=auto,"));
}

#[test]
fn test_sql_invalid_table_in_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tally.yml"), "table: \"bad name\"\n").unwrap();
    let output = run_tally(dir.path(), &["sql"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("[C003]"));
}

#[test]
fn test_sql_unknown_dialect_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(dir.path(), &["sql", "--dialect", "oracle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown dialect"));
}

#[test]
fn test_sql_invalid_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(dir.path(), &["sql", "--table", "t; DROP TABLE users"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid table name"));
}

#[test]
fn test_sql_invalid_quorum_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(
        dir.path(),
        &["sql", "--dialect", "clickhouse", "--insert-quorum", "most"],
    );
    assert!(!output.status.success());
}

// ── DuckDB workflow ─────────────────────────────────────────────────────

#[test]
fn test_store_commands_require_duckdb() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tally(dir.path(), &["init", "--dialect", "postgres"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("only executes duckdb statements"));
}

#[test]
fn test_duckdb_workflow() {
    let dir = tempfile::tempdir().unwrap();
    write_duckdb_project(dir.path());

    let output = run_tally(dir.path(), &["init"]);
    assert_success(&output);
    assert!(stdout(&output).contains("schema_migrations ready"));

    // init again: table creation is idempotent
    assert_success(&run_tally(dir.path(), &["init"]));

    let output = run_tally(dir.path(), &["version"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "no migrations applied");

    assert_success(&run_tally(dir.path(), &["mark", "1"]));
    assert_success(&run_tally(dir.path(), &["mark", "2"]));
    assert_success(&run_tally(dir.path(), &["mark", "2", "--down"]));

    let output = run_tally(dir.path(), &["version"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "2");

    let output = run_tally(dir.path(), &["status", "--output", "json"]);
    assert_success(&output);
    let statuses: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let statuses = statuses.as_array().unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0]["version_id"], 2);
    assert_eq!(statuses[0]["is_applied"], false);
    assert_eq!(statuses[0]["records"], 2);
    assert_eq!(statuses[1]["version_id"], 1);
    assert_eq!(statuses[1]["is_applied"], true);

    let output = run_tally(dir.path(), &["forget", "2"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Deleted all records of version 2"));

    let output = run_tally(dir.path(), &["version"]);
    assert_eq!(stdout(&output).trim(), "1");

    let output = run_tally(dir.path(), &["forget", "2"]);
    assert_success(&output);
    assert!(stdout(&output).contains("has no records"));
}

#[test]
fn test_status_table_output() {
    let dir = tempfile::tempdir().unwrap();
    write_duckdb_project(dir.path());

    let output = run_tally(dir.path(), &["status"]);
    assert_success(&output);
    assert!(stdout(&output).contains("no migrations recorded"));

    assert_success(&run_tally(dir.path(), &["mark", "7"]));
    let output = run_tally(dir.path(), &["status"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("VERSION"));
    assert!(out.contains("7"));
    assert!(out.contains("yes"));
}
