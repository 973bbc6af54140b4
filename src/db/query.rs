use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{Batch, Connection};
use std::path::Path;
use thiserror::Error;

use super::ExpenseStore;

#[derive(Debug, Error)]
pub(crate) enum QueryError {
    /// Diagnostic text reported by SQLite, passed through unchanged.
    #[error("{0}")]
    EngineFailure(String),
}

impl From<rusqlite::Error> for QueryError {
    fn from(e: rusqlite::Error) -> Self {
        Self::EngineFailure(e.to_string())
    }
}

/// Column names plus rows of typed values, in the order SQLite returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct QueryResult {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// A zero-row result. Valid outcome, distinct from a failure.
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value of `column` in row `row`, if both exist.
    #[cfg(test)]
    pub(crate) fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c.eq_ignore_ascii_case(column))?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Rows rendered as strings, reals rounded to cents.
    pub(crate) fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(display_value).collect())
            .collect()
    }

    /// Write header plus rows to `path`. Returns the number of data rows.
    pub(crate) fn write_csv(&self, path: &Path) -> Result<usize> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(raw_value))?;
        }
        wtr.flush()?;
        Ok(self.rows.len())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Real(r) => format!("{r:.2}"),
        other => raw_value(other),
    }
}

fn raw_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Something that can run a SQL statement against the store.
pub(crate) trait QueryExecutor {
    fn execute(&self, sql: &str) -> Result<QueryResult, QueryError>;
}

/// Runs any statement SQLite accepts, reads and writes alike, with no
/// filtering. Substitute another [`QueryExecutor`] to restrict this.
pub(crate) struct UnrestrictedSqlExecutor<'a> {
    store: &'a ExpenseStore,
}

impl<'a> UnrestrictedSqlExecutor<'a> {
    pub(crate) fn new(store: &'a ExpenseStore) -> Self {
        Self { store }
    }
}

impl QueryExecutor for UnrestrictedSqlExecutor<'_> {
    fn execute(&self, sql: &str) -> Result<QueryResult, QueryError> {
        tracing::debug!(%sql, "executing query");
        let outcome = self
            .store
            .connect()
            .map_err(QueryError::from)
            .and_then(|conn| run_statement(&conn, sql));
        match outcome {
            Ok(result) => {
                tracing::debug!(rows = result.row_count(), "query finished");
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(error = %e, "query failed");
                Err(e)
            }
        }
    }
}

/// Run exactly one statement. Empty input, or a second statement after the
/// first, is rejected before anything executes.
fn run_statement(conn: &Connection, sql: &str) -> Result<QueryResult, QueryError> {
    let mut batch = Batch::new(conn, sql);
    let Some(mut stmt) = batch.next()? else {
        return Err(QueryError::EngineFailure(
            "no SQL statement to execute".into(),
        ));
    };
    if batch.next()?.is_some() {
        return Err(QueryError::EngineFailure(
            "only one SQL statement can be executed at a time".into(),
        ));
    }

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..width)
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(values);
    }
    Ok(QueryResult { columns, rows: out })
}
