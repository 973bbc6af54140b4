#![allow(clippy::unwrap_used)]

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── MonthName ─────────────────────────────────────────────────

#[test]
fn test_month_all_in_calendar_order() {
    let all = MonthName::all();
    assert_eq!(all.len(), 12);
    assert_eq!(all[0], MonthName::January);
    assert_eq!(all[11], MonthName::December);
    for (i, m) in all.iter().enumerate() {
        assert_eq!(m.number() as usize, i + 1);
    }
}

#[test]
fn test_month_parse_canonical_names() {
    assert_eq!("January".parse::<MonthName>().unwrap(), MonthName::January);
    assert_eq!("April".parse::<MonthName>().unwrap(), MonthName::April);
    assert_eq!("December".parse::<MonthName>().unwrap(), MonthName::December);
}

#[test]
fn test_month_parse_rejects_non_canonical() {
    for bad in ["january", "JANUARY", "Jan", "", " April", "Smarch", "13"] {
        let err = bad.parse::<MonthName>().unwrap_err();
        assert_eq!(err, InvalidMonth(bad.to_string()));
    }
}

#[test]
fn test_month_roundtrip() {
    for m in MonthName::all() {
        let s = m.as_str();
        let back: MonthName = s.parse().unwrap();
        assert_eq!(*m, back, "Roundtrip failed for {s}");
    }
}

#[test]
fn test_month_display_and_table_name() {
    assert_eq!(format!("{}", MonthName::March), "March");
    assert_eq!(MonthName::March.table_name(), "March");
}

#[test]
fn test_days_in_month() {
    let long = [
        MonthName::January,
        MonthName::March,
        MonthName::May,
        MonthName::July,
        MonthName::August,
        MonthName::October,
        MonthName::December,
    ];
    let short = [
        MonthName::April,
        MonthName::June,
        MonthName::September,
        MonthName::November,
    ];
    for m in long {
        assert_eq!(m.days_in_month(), 31, "{m}");
    }
    for m in short {
        assert_eq!(m.days_in_month(), 30, "{m}");
    }
}

#[test]
fn test_february_fixed_at_28_days() {
    assert_eq!(RECORD_YEAR % 4, 0);
    assert_eq!(MonthName::February.days_in_month(), 28);
}

#[test]
fn test_invalid_month_message() {
    let err = InvalidMonth("Smarch".into());
    assert!(err.to_string().contains("Smarch"));
}

// ── ExpenseRecord ─────────────────────────────────────────────

fn make_record(date: &str, amount: Decimal, cashback: Decimal) -> ExpenseRecord {
    ExpenseRecord {
        date: date.into(),
        category: "Dining".into(),
        payment_mode: "UPI".into(),
        description: "Dinner at a restaurant".into(),
        amount_paid: amount,
        cashback,
        month: MonthName::June,
    }
}

#[test]
fn test_record_parsed_date() {
    let date = make_record("2024-06-09", dec!(10), dec!(0)).parsed_date().unwrap();
    assert_eq!(date.day(), 9);
    assert!(make_record("not a date", dec!(10), dec!(0)).parsed_date().is_none());
    assert!(make_record("2024-06-31", dec!(10), dec!(0)).parsed_date().is_none());
}

#[test]
fn test_record_date_matches_month() {
    assert!(make_record("2024-06-30", dec!(10), dec!(0)).date_matches_month());
    assert!(!make_record("2024-07-01", dec!(10), dec!(0)).date_matches_month());
    assert!(!make_record("garbage", dec!(10), dec!(0)).date_matches_month());
}

#[test]
fn test_record_net_amount() {
    let r = make_record("2024-06-01", dec!(120.50), dec!(4.25));
    assert_eq!(r.net_amount(), dec!(116.25));
}

#[test]
fn test_record_display_fields() {
    let r = make_record("2024-06-01", dec!(75.5), dec!(0));
    assert_eq!(
        r.display_fields(),
        vec![
            "2024-06-01",
            "Dining",
            "UPI",
            "Dinner at a restaurant",
            "75.50",
            "0.00",
            "June",
        ]
    );
}
