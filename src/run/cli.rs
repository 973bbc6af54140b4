use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::table::{format_amount, render_table};
use crate::db::{
    column_names, ExpenseStore, QueryError, QueryExecutor, QueryResult, VIEW_NAME,
};
use crate::generate::ExpenseGenerator;
use crate::models::MonthName;
use crate::reports;

/// Flags that take a value; their values are never treated as positionals.
const VALUE_FLAGS: &[&str] = &["--seed", "--csv"];

pub(crate) fn as_cli(args: &[String], store: &ExpenseStore) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "init" => cli_init(store),
        "generate" | "g" => cli_generate(rest, store),
        "reports" => cli_reports(),
        "report" | "r" => cli_report(rest, store),
        "query" | "q" => cli_query(rest, store),
        "show" => cli_show(rest, store),
        "counts" => cli_counts(store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expenses {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("expenses — month-partitioned personal expense store");
    println!();
    println!("Usage: expenses [--db <path>] <command>");
    println!();
    println!("Commands:");
    println!("  init                          Create the twelve month tables");
    println!("  generate <Month>              Generate 15-20 sample expenses for a month");
    println!("    --seed <n>                  Reproducible batch from a fixed seed");
    println!("  reports                       List the predefined reports");
    println!("  report <n|label>              Run a predefined report");
    println!("  query \"<sql>\"                 Run any SQL statement against the store");
    println!("    --csv <path>                Also write the result to a CSV file");
    println!("  show <Month>                  List the stored expenses for a month");
    println!("  counts                        Row counts per month");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("The database path defaults to $EXPENSES_DB, then the user data directory.");
}

fn cli_init(store: &ExpenseStore) -> Result<()> {
    store.ensure_schema()?;
    println!(
        "Initialized {} tables in {}",
        store.table_count()?,
        store.path().display()
    );
    Ok(())
}

fn cli_generate(args: &[String], store: &ExpenseStore) -> Result<()> {
    let Some(month_arg) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: expenses generate <Month> [--seed <n>]");
    };
    let month: MonthName = month_arg.parse()?;

    let mut generator = match flag_value(args, "--seed") {
        Some(raw) => {
            let seed: u64 = raw
                .parse()
                .with_context(|| format!("Invalid seed: {raw}"))?;
            ExpenseGenerator::seeded(seed)
        }
        None => ExpenseGenerator::from_entropy(),
    };

    store.ensure_schema()?;
    let batch = generator.generate(store, month)?;
    store.ensure_combined_view()?;

    println!("Data for {month} generated and loaded into the database!");
    println!();
    let rows: Vec<Vec<String>> = batch.iter().map(|r| r.display_fields()).collect();
    print!("{}", render_table(&column_names(), &rows));

    let total: Decimal = batch.iter().map(|r| r.amount_paid).sum();
    let cashback: Decimal = batch.iter().map(|r| r.cashback).sum();
    println!();
    println!("  Expenses:  {}", batch.len());
    println!("  Paid:      {}", format_amount(total));
    println!("  Cashback:  {}", format_amount(cashback));
    println!(
        "  Net:       {}",
        format_amount(batch.iter().map(|r| r.net_amount()).sum())
    );
    Ok(())
}

fn cli_reports() -> Result<()> {
    for (i, report) in reports::all().iter().enumerate() {
        println!("  {}. {}", i + 1, report.label);
    }
    Ok(())
}

fn cli_report(args: &[String], store: &ExpenseStore) -> Result<()> {
    let selector = positionals(args).join(" ");
    if selector.is_empty() {
        anyhow::bail!("Usage: expenses report <n|label> [--csv <path>]");
    }
    let report = reports::resolve(&selector)
        .ok_or_else(|| anyhow::anyhow!("Unknown report: {selector}. Run `expenses reports` to list them"))?;

    println!("{}", report.label);
    println!();
    print_outcome(
        store.executor().execute(report.sql),
        flag_value(args, "--csv").map(Path::new),
    )
}

fn cli_query(args: &[String], store: &ExpenseStore) -> Result<()> {
    let sql = positionals(args).join(" ");
    if sql.trim().is_empty() {
        anyhow::bail!("Usage: expenses query \"<sql>\" [--csv <path>]");
    }
    print_outcome(
        store.executor().execute(&sql),
        flag_value(args, "--csv").map(Path::new),
    )
}

fn cli_show(args: &[String], store: &ExpenseStore) -> Result<()> {
    let Some(month_arg) = positionals(args).first().copied() else {
        anyhow::bail!("Usage: expenses show <Month>");
    };
    let month: MonthName = month_arg.parse()?;
    store.ensure_schema()?;

    let records = store.partition_records(month)?;
    if records.is_empty() {
        println!("No expenses recorded for {month}");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = records.iter().map(|r| r.display_fields()).collect();
    print!("{}", render_table(&column_names(), &rows));
    Ok(())
}

fn cli_counts(store: &ExpenseStore) -> Result<()> {
    store.ensure_schema()?;
    let counts = store.partition_counts()?;
    let total: i64 = counts.iter().map(|(_, n)| n).sum();

    println!("{:<12} {:>6}", "Month", "Rows");
    println!("{}", "─".repeat(19));
    for (month, count) in &counts {
        println!("{:<12} {count:>6}", month.as_str());
    }
    println!("{}", "─".repeat(19));
    println!("{:<12} {total:>6}", "Total");
    if !store.view_exists()? {
        println!();
        println!("View '{VIEW_NAME}' not created yet. Generate a month to create it.");
    }
    Ok(())
}

/// Print a query outcome. An empty result is informational; an engine
/// failure becomes the command's error with the engine's text intact.
fn print_outcome(outcome: Result<QueryResult, QueryError>, csv_path: Option<&Path>) -> Result<()> {
    let result = match outcome {
        Ok(result) => result,
        Err(QueryError::EngineFailure(msg)) => {
            anyhow::bail!("An error occurred while executing the query: {msg}")
        }
    };

    if let Some(path) = csv_path {
        let count = result.write_csv(path)?;
        println!("Wrote {count} rows to {}", path.display());
    }

    if result.is_empty() {
        println!("No data available for this query!");
    } else {
        print!("{}", render_table(&result.columns, &result.display_rows()));
    }
    Ok(())
}

/// Value following `flag`, if present.
pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither value flags nor their values.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}
