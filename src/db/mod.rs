mod query;
mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::models::*;

pub(crate) use query::{QueryError, QueryExecutor, QueryResult, UnrestrictedSqlExecutor};
pub(crate) use schema::{column_names, VIEW_NAME};

/// Month-partitioned expense store backed by a single SQLite file.
///
/// Holds only the file path. Every operation opens its own connection and
/// drops it when done.
pub(crate) struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection, creating the file if it does not exist.
    pub(crate) fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(conn)
    }

    fn open(&self) -> Result<Connection> {
        self.connect()
            .with_context(|| format!("Failed to open database: {}", self.path.display()))
    }

    // ── Schema ────────────────────────────────────────────────

    /// Create any missing month partition. Safe to call repeatedly.
    pub(crate) fn ensure_schema(&self) -> Result<()> {
        let conn = self.open()?;
        let ddl = MonthName::all()
            .iter()
            .map(|m| schema::create_partition_sql(*m))
            .collect::<Vec<_>>()
            .join("\n");
        conn.execute_batch(&ddl)
            .context("Failed to create month partitions")?;
        tracing::debug!(path = %self.path.display(), "month partitions ensured");
        Ok(())
    }

    /// Create the combined view over all partitions unless it already exists.
    /// An existing view is left untouched, even if partitions changed since.
    pub(crate) fn ensure_combined_view(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute_batch(&schema::create_view_sql())
            .with_context(|| format!("Failed to create view '{VIEW_NAME}'"))?;
        tracing::debug!(view = VIEW_NAME, "combined view ensured");
        Ok(())
    }

    pub(crate) fn view_exists(&self) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='view' AND name=?1)",
            params![VIEW_NAME],
            |row| row.get(0),
        )?)
    }

    pub(crate) fn table_count(&self) -> Result<i64> {
        let conn = self.open()?;
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
            [],
            |row| row.get(0),
        )?)
    }

    // ── Records ───────────────────────────────────────────────

    /// Append `records` to the partition for `month`. Existing rows are never
    /// touched. Every record must belong to `month`.
    pub(crate) fn append(&self, month: MonthName, records: &[ExpenseRecord]) -> Result<usize> {
        if let Some(stray) = records.iter().find(|r| r.month != month) {
            anyhow::bail!(
                "Record for {} cannot be stored in the {month} partition",
                stray.month
            );
        }
        if let Some(bad) = records.iter().find(|r| !r.date_matches_month()) {
            anyhow::bail!("Record dated '{}' does not fall in {month}", bad.date);
        }

        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&schema::insert_sql(month))?;
            for rec in records {
                stmt.execute(params![
                    rec.date,
                    rec.category,
                    rec.payment_mode,
                    rec.description,
                    to_real(rec.amount_paid)?,
                    to_real(rec.cashback)?,
                    rec.month.as_str(),
                ])?;
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to append records to {month}"))?;
        tracing::info!(%month, rows = records.len(), "appended expense batch");
        Ok(records.len())
    }

    pub(crate) fn partition_records(&self, month: MonthName) -> Result<Vec<ExpenseRecord>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT Date, Category, Payment_Mode, Description, Amount_Paid, Cashback, Month
             FROM {} ORDER BY Date, rowid",
            month.table_name()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ExpenseRecord {
                date: row.get(0)?,
                category: row.get(1)?,
                payment_mode: row.get(2)?,
                description: row.get(3)?,
                amount_paid: to_cents(row.get(4)?),
                cashback: to_cents(row.get(5)?),
                month: stored_month(row, 6, month)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn partition_count(&self, month: MonthName) -> Result<i64> {
        let conn = self.open()?;
        Ok(conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", month.table_name()),
            [],
            |row| row.get(0),
        )?)
    }

    /// Row counts for every partition, in calendar order.
    pub(crate) fn partition_counts(&self) -> Result<Vec<(MonthName, i64)>> {
        MonthName::all()
            .iter()
            .map(|m| -> Result<(MonthName, i64)> { Ok((*m, self.partition_count(*m)?)) })
            .collect()
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn executor(&self) -> UnrestrictedSqlExecutor<'_> {
        UnrestrictedSqlExecutor::new(self)
    }
}

/// Month column of a partition row. It must name the partition it sits in.
fn stored_month(row: &Row<'_>, idx: usize, partition: MonthName) -> rusqlite::Result<MonthName> {
    let raw: String = row.get(idx)?;
    let conversion_failure = |e: Box<dyn std::error::Error + Send + Sync>| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e)
    };
    let month: MonthName = raw.parse().map_err(|e| conversion_failure(Box::new(e)))?;
    if month != partition {
        return Err(conversion_failure(
            format!("row for {month} found in the {partition} partition").into(),
        ));
    }
    Ok(month)
}

fn to_real(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .with_context(|| format!("Amount {value} cannot be stored as REAL"))
}

fn to_cents(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(2)
}
