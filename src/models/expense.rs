use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::MonthName;

/// One expense row as stored in a month partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub category: String,
    pub payment_mode: String,
    pub description: String,
    pub amount_paid: Decimal,
    pub cashback: Decimal,
    pub month: MonthName,
}

impl ExpenseRecord {
    /// Parsed `date`, or `None` if it is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Whether the date falls in the record's own month.
    pub fn date_matches_month(&self) -> bool {
        self.parsed_date().map(|d| d.month()) == Some(self.month.number())
    }

    /// Amount paid after cashback.
    pub fn net_amount(&self) -> Decimal {
        self.amount_paid - self.cashback
    }

    /// Column values in partition order, formatted for display or export.
    pub fn display_fields(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.category.clone(),
            self.payment_mode.clone(),
            self.description.clone(),
            format!("{:.2}", self.amount_paid),
            format!("{:.2}", self.cashback),
            self.month.to_string(),
        ]
    }
}
