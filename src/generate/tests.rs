#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Datelike;
use rust_decimal_macros::dec;

fn temp_store() -> (tempfile::TempDir, ExpenseStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ExpenseStore::new(dir.path().join("expenses.db"));
    store.ensure_schema().unwrap();
    (dir, store)
}

// ── Batch shape ───────────────────────────────────────────────

#[test]
fn test_batch_respects_bounds_for_every_month() {
    let mut generator = ExpenseGenerator::seeded(7);
    for month in MonthName::all() {
        for _ in 0..10 {
            let batch = generator.batch(*month);
            assert!(BATCH_SIZE.contains(&batch.len()), "{month}: {}", batch.len());
            for rec in &batch {
                let day = rec.parsed_date().unwrap().day();
                assert!((1..=month.days_in_month()).contains(&day), "{}", rec.date);
                assert!(rec.amount_paid >= dec!(50.00) && rec.amount_paid <= dec!(500.00));
                assert!(rec.cashback >= dec!(0.00) && rec.cashback <= dec!(20.00));
                assert_eq!(rec.month, *month);
            }
        }
    }
}

#[test]
fn test_february_never_exceeds_28_days() {
    let mut generator = ExpenseGenerator::seeded(2024);
    for _ in 0..200 {
        for rec in generator.batch(MonthName::February) {
            assert!(rec.parsed_date().unwrap().day() <= 28, "{}", rec.date);
        }
    }
}

#[test]
fn test_date_format_zero_padded() {
    let mut generator = ExpenseGenerator::seeded(1);
    for rec in generator.batch(MonthName::March) {
        assert_eq!(rec.date.len(), 10);
        assert!(rec.date.starts_with("2024-03-"), "{}", rec.date);
    }
}

#[test]
fn test_amounts_have_two_decimal_places() {
    let mut generator = ExpenseGenerator::seeded(99);
    for rec in generator.batch(MonthName::July) {
        assert!(rec.amount_paid.scale() <= 2);
        assert!(rec.cashback.scale() <= 2);
        assert_eq!(rec.amount_paid, rec.amount_paid.round_dp(2));
    }
}

#[test]
fn test_fields_drawn_from_catalogs() {
    let mut generator = ExpenseGenerator::seeded(3);
    for rec in generator.batch(MonthName::October) {
        assert!(CATEGORIES.contains(&rec.category.as_str()));
        assert!(PAYMENT_MODES.contains(&rec.payment_mode.as_str()));
        assert!(DESCRIPTIONS.contains(&rec.description.as_str()));
    }
}

#[test]
fn test_catalog_sizes() {
    assert_eq!(CATEGORIES.len(), 10);
    assert_eq!(PAYMENT_MODES.len(), 6);
    assert_eq!(DESCRIPTIONS.len(), 10);
}

#[test]
fn test_same_seed_same_batch() {
    let a = ExpenseGenerator::seeded(42).batch(MonthName::May);
    let b = ExpenseGenerator::seeded(42).batch(MonthName::May);
    assert_eq!(a, b);
}

#[test]
fn test_batch_sizes_cover_range() {
    let mut generator = ExpenseGenerator::seeded(11);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(generator.batch(MonthName::January).len());
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn test_injected_rng() {
    let rng = rand::rngs::StdRng::seed_from_u64(5);
    let mut generator = ExpenseGenerator::new(rng);
    assert!(!generator.batch(MonthName::June).is_empty());
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn test_generate_appends_to_partition() {
    let (_dir, store) = temp_store();
    let mut generator = ExpenseGenerator::seeded(8);

    let first = generator.generate(&store, MonthName::April).unwrap();
    assert_eq!(store.partition_count(MonthName::April).unwrap(), first.len() as i64);

    let second = generator.generate(&store, MonthName::April).unwrap();
    assert_eq!(
        store.partition_count(MonthName::April).unwrap(),
        (first.len() + second.len()) as i64
    );
    assert_eq!(store.partition_count(MonthName::May).unwrap(), 0);
}

#[test]
fn test_generate_persists_batch_values() {
    let (_dir, store) = temp_store();
    let mut generator = ExpenseGenerator::seeded(21);
    let batch = generator.generate(&store, MonthName::August).unwrap();

    let stored = store.partition_records(MonthName::August).unwrap();
    assert_eq!(stored.len(), batch.len());
    let batch_total: Decimal = batch.iter().map(|r| r.amount_paid).sum();
    let stored_total: Decimal = stored.iter().map(|r| r.amount_paid).sum();
    assert_eq!(batch_total, stored_total);
    assert!(stored.iter().all(|r| r.month == MonthName::August));
}
