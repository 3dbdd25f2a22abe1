//! Syntax check for generated bookkeeping SQL

use sqlparser::dialect::{
    ClickHouseDialect, Dialect as ParserDialect, DuckDbDialect, GenericDialect, MsSqlDialect,
    MySqlDialect, PostgreSqlDialect, RedshiftSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;
use tally_core::Dialect;

use crate::error::{DialectError, DialectResult};
use crate::querier::{Operation, Querier};

/// Result of checking one rendered operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The statement parsed as exactly one statement
    Parsed,
    /// Not parsed: sqlparser has no grammar for the named construct
    Skipped(&'static str),
}

/// Parser dialect used to check statements for `dialect`.
///
/// TiDB speaks the MySQL grammar; Vertica has no dedicated parser dialect.
fn parser_dialect(dialect: Dialect) -> Box<dyn ParserDialect> {
    match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql | Dialect::TiDb => Box::new(MySqlDialect {}),
        Dialect::Sqlite3 => Box::new(SQLiteDialect {}),
        Dialect::MsSql => Box::new(MsSqlDialect {}),
        Dialect::Redshift => Box::new(RedshiftSqlDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::ClickHouse => Box::new(ClickHouseDialect {}),
        Dialect::Vertica => Box::new(GenericDialect {}),
    }
}

/// Backend syntax the queriers emit on purpose but sqlparser 0.61 rejects.
fn unsupported_construct(dialect: Dialect, op: Operation) -> Option<&'static str> {
    match (dialect, op) {
        (Dialect::ClickHouse, Operation::InsertVersion) => Some("INSERT ... SETTINGS"),
        (Dialect::ClickHouse, Operation::DeleteVersion) => Some("ALTER TABLE ... DELETE"),
        (Dialect::Redshift, Operation::CreateTable) => Some("identity(seed, step)"),
        _ => None,
    }
}

/// Render `op` with `querier` and check the statement.
///
/// Statements built on syntax listed in `unsupported_construct` are reported
/// as skipped instead of failing.
pub fn check_operation(
    querier: &dyn Querier,
    op: Operation,
    table: &str,
) -> DialectResult<CheckOutcome> {
    let dialect = querier.dialect();
    if let Some(construct) = unsupported_construct(dialect, op) {
        log::debug!("Not parsing {} {}: {}", dialect, op, construct);
        return Ok(CheckOutcome::Skipped(construct));
    }
    check_statement(dialect, &op.render(querier, table))?;
    Ok(CheckOutcome::Parsed)
}

/// Check that `sql` parses as exactly one statement in `dialect`.
pub fn check_statement(dialect: Dialect, sql: &str) -> DialectResult<()> {
    if sql.trim().is_empty() {
        return Err(DialectError::EmptySql);
    }

    let parser = parser_dialect(dialect);
    let statements = Parser::parse_sql(parser.as_ref(), sql).map_err(|e| {
        let message = e.to_string();
        let (line, column) = location_from_message(&message);
        DialectError::SyntaxError {
            dialect: dialect.to_string(),
            message,
            line,
            column,
        }
    })?;

    match statements.len() {
        1 => Ok(()),
        n => Err(DialectError::StatementCount(n)),
    }
}

/// Recover the position from a parser message.
///
/// sqlparser 0.61 reports errors as plain strings; the location only survives
/// as an "at Line: N, Column: M" suffix. Missing or malformed positions give
/// `(0, 0)`.
fn location_from_message(msg: &str) -> (usize, usize) {
    let number_after = |label: &str| -> Option<usize> {
        let start = msg.find(label)? + label.len();
        let digits: String = msg[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    };
    match (number_after("Line: "), number_after("Column: ")) {
        (Some(line), Some(column)) => (line, column),
        _ => (0, 0),
    }
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
