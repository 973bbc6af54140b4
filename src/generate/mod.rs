use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::ops::RangeInclusive;

use crate::db::ExpenseStore;
use crate::models::{ExpenseRecord, MonthName, RECORD_YEAR};

pub(crate) const CATEGORIES: [&str; 10] = [
    "Bills",
    "Dining",
    "Groceries",
    "Investments",
    "Stationery",
    "Subscriptions",
    "Fruits & Vegetables",
    "School FEES",
    "Home Essentials",
    "Sports & Fitness",
];

pub(crate) const PAYMENT_MODES: [&str; 6] = [
    "Cash",
    "Wallet",
    "UPI",
    "Net Banking",
    "Credit Card",
    "Debit Card",
];

pub(crate) const DESCRIPTIONS: [&str; 10] = [
    "Paid electricity bill",
    "Monthly groceries",
    "Dinner at a restaurant",
    "Investment in mutual funds",
    "School fees",
    "Gym subscription",
    "Office supplies",
    "Purchased fruits and vegetables",
    "Household items",
    "Annual sports membership",
];

/// Records per generated batch.
pub(crate) const BATCH_SIZE: RangeInclusive<usize> = 15..=20;

// Amounts are drawn in whole cents so every value has exactly two decimals.
const AMOUNT_CENTS: RangeInclusive<i64> = 5_000..=50_000;
const CASHBACK_CENTS: RangeInclusive<i64> = 0..=2_000;

/// Synthesizes plausible expense records. The random source is injected so
/// batches can be reproduced from a seed.
pub(crate) struct ExpenseGenerator<R: Rng> {
    rng: R,
}

impl ExpenseGenerator<StdRng> {
    pub(crate) fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub(crate) fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ExpenseGenerator<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a batch for `month` and append it to that month's partition.
    /// Returns the batch exactly as written.
    pub(crate) fn generate(
        &mut self,
        store: &ExpenseStore,
        month: MonthName,
    ) -> Result<Vec<ExpenseRecord>> {
        let batch = self.batch(month);
        store.append(month, &batch)?;
        Ok(batch)
    }

    pub(crate) fn batch(&mut self, month: MonthName) -> Vec<ExpenseRecord> {
        let size = self.rng.gen_range(BATCH_SIZE);
        (0..size).map(|_| self.record(month)).collect()
    }

    pub(crate) fn record(&mut self, month: MonthName) -> ExpenseRecord {
        let day = self.rng.gen_range(1..=month.days_in_month());
        ExpenseRecord {
            date: format!("{RECORD_YEAR}-{:02}-{day:02}", month.number()),
            category: self.pick(&CATEGORIES).to_string(),
            payment_mode: self.pick(&PAYMENT_MODES).to_string(),
            description: self.pick(&DESCRIPTIONS).to_string(),
            amount_paid: Decimal::new(self.rng.gen_range(AMOUNT_CENTS), 2),
            cashback: Decimal::new(self.rng.gen_range(CASHBACK_CENTS), 2),
            month,
        }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.gen_range(0..options.len())]
    }
}

#[cfg(test)]
mod tests;
