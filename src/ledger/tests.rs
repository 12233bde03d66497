#![allow(clippy::unwrap_used)]

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::form::ValidationError;
use super::price::{format_price_input, parse_price, strip_non_digits};
use super::view::distinct_months;
use super::*;
use crate::models::MonthKey;
use crate::ui::util::format_rupiah;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn make_expense(id: i64, description: &str, price: Decimal, date: DateTime<Utc>) -> Expense {
    Expense::new(id, description.into(), price, date)
}

fn make_form(description: &str, price: &str) -> ExpenseForm {
    let mut form = ExpenseForm::new(at(2024, 1, 15, 8, 0).naive_utc());
    form.description = description.into();
    form.price = price.into();
    form
}

fn month(s: &str) -> MonthFilter {
    s.parse().unwrap()
}

// ── Price input ───────────────────────────────────────────────

#[test]
fn test_strip_non_digits() {
    assert_eq!(strip_non_digits("Rp 15.000,-"), "15000");
    assert_eq!(strip_non_digits("abc"), "");
    assert_eq!(strip_non_digits("١٢٣"), "");
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands("0"), "0");
    assert_eq!(group_thousands("999"), "999");
    assert_eq!(group_thousands("1000"), "1.000");
    assert_eq!(group_thousands("1234567"), "1.234.567");
    assert_eq!(group_thousands("007"), "7");
    assert_eq!(group_thousands("000"), "0");
}

#[test]
fn test_format_price_input_live() {
    assert_eq!(format_price_input("15000"), "15.000");
    assert_eq!(format_price_input("15.0000"), "150.000");
    assert_eq!(format_price_input("1.50"), "150");
    assert_eq!(format_price_input("x"), "");
    assert_eq!(format_price_input(""), "");
}

#[test]
fn test_parse_price() {
    assert_eq!(parse_price("15.000"), Some(dec!(15000)));
    assert_eq!(parse_price("Rp 2.500"), Some(dec!(2500)));
    assert_eq!(parse_price("0"), Some(Decimal::ZERO));
    assert_eq!(parse_price("kopi"), None);
    assert_eq!(parse_price("99999999999999999999999999999999999"), None);
}

// ── Form validation ───────────────────────────────────────────

#[test]
fn test_validate_uses_submission_time() {
    let now = at(2024, 3, 1, 12, 0);
    let expense = make_form("  Kopi  ", "15.000").validate(now, &Utc).unwrap();
    assert_eq!(expense.id, now.timestamp_millis());
    assert_eq!(expense.description, "Kopi");
    assert_eq!(expense.price, dec!(15000));
    assert_eq!(expense.date, now);
}

#[test]
fn test_validate_rejects_empty_description() {
    let err = make_form("   ", "15.000")
        .validate(at(2024, 3, 1, 12, 0), &Utc)
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptyDescription);
    assert_eq!(err.to_string(), "Mohon isi deskripsi dan harga dengan benar.");
}

#[test]
fn test_validate_rejects_bad_prices() {
    let now = at(2024, 3, 1, 12, 0);
    for price in ["", "0", "000", "abc"] {
        let err = make_form("Kopi", price).validate(now, &Utc).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice, "price {price:?}");
    }
}

#[test]
fn test_validate_rejects_price_above_limit() {
    let now = at(2024, 3, 1, 12, 0);
    let expense = make_form("Rumah", "9.007.199.254.740.992")
        .validate(now, &Utc)
        .unwrap();
    assert_eq!(expense.price, dec!(9007199254740992));

    for price in ["9007199254740993", "9999999999999999999999999999"] {
        let err = make_form("Rumah", price).validate(now, &Utc).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice, "price {price:?}");
    }
}

#[test]
fn test_validate_custom_date_as_local_time() {
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    let mut form = make_form("Makan siang", "25.000");
    form.toggle_custom_date();
    form.date = "2024-02-01".into();
    form.time = "01:30".into();

    let expense = form.validate(at(2024, 3, 1, 12, 0), &wib).unwrap();
    assert_eq!(expense.date, at(2024, 1, 31, 18, 30));
}

#[test]
fn test_validate_custom_date_requires_both_fields() {
    let now = at(2024, 3, 1, 12, 0);
    let mut form = make_form("Kopi", "15.000");
    form.toggle_custom_date();
    form.time.clear();
    assert_eq!(
        form.validate(now, &Utc).unwrap_err(),
        ValidationError::MissingCustomDate
    );

    form.time = "10:00".into();
    form.date.clear();
    assert_eq!(
        form.validate(now, &Utc).unwrap_err(),
        ValidationError::MissingCustomDate
    );
}

#[test]
fn test_validate_custom_date_rejects_garbage() {
    let mut form = make_form("Kopi", "15.000");
    form.toggle_custom_date();
    form.date = "2024-02-30".into();
    form.time = "10:00".into();
    assert!(matches!(
        form.validate(at(2024, 3, 1, 12, 0), &Utc),
        Err(ValidationError::InvalidCustomDate(_))
    ));
}

#[test]
fn test_hidden_custom_date_is_ignored() {
    let now = at(2024, 3, 1, 12, 0);
    let mut form = make_form("Kopi", "15.000");
    form.date.clear();
    form.time.clear();
    assert_eq!(form.validate(now, &Utc).unwrap().date, now);
}

#[test]
fn test_description_checked_before_custom_date() {
    let mut form = make_form("", "15.000");
    form.toggle_custom_date();
    form.date.clear();
    assert_eq!(
        form.validate(at(2024, 3, 1, 12, 0), &Utc).unwrap_err(),
        ValidationError::EmptyDescription
    );
}

// ── Form state ────────────────────────────────────────────────

#[test]
fn test_form_seeds_date_and_time() {
    let now = NaiveDate::from_ymd_opt(2024, 5, 9)
        .unwrap()
        .and_hms_opt(7, 5, 59)
        .unwrap();
    let form = ExpenseForm::new(now);
    assert_eq!(form.date, "2024-05-09");
    assert_eq!(form.time, "07:05");
    assert!(!form.custom_date);
    assert_eq!(form.focus, FormField::Description);
}

#[test]
fn test_form_reset() {
    let mut form = make_form("Kopi", "15.000");
    form.toggle_custom_date();
    form.focus = FormField::Time;
    form.date = "2020-01-01".into();

    let later = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(21, 45, 0)
        .unwrap();
    form.reset(later);

    assert!(form.description.is_empty());
    assert!(form.price.is_empty());
    assert!(!form.custom_date);
    assert_eq!(form.focus, FormField::Description);
    assert_eq!(form.date, "2024-06-01");
    assert_eq!(form.time, "21:45");
}

#[test]
fn test_form_focus_skips_hidden_fields() {
    let mut form = make_form("", "");
    assert!(form.focus_next());
    assert_eq!(form.focus, FormField::Price);
    assert!(form.focus_next());
    assert_eq!(form.focus, FormField::CustomDate);
    assert!(!form.focus_next());
    assert_eq!(form.focus, FormField::CustomDate);

    form.toggle_custom_date();
    assert!(form.focus_next());
    assert_eq!(form.focus, FormField::Date);
    assert!(form.focus_next());
    assert_eq!(form.focus, FormField::Time);

    form.toggle_custom_date();
    assert_eq!(form.focus, FormField::CustomDate);
}

#[test]
fn test_form_focus_prev_stops_at_description() {
    let mut form = make_form("", "");
    assert!(!form.focus_prev());
    form.focus = FormField::CustomDate;
    assert!(form.focus_prev());
    assert_eq!(form.focus, FormField::Price);
}

#[test]
fn test_form_typing_price_reformats() {
    let mut form = make_form("", "");
    form.focus = FormField::Price;
    for c in "25000".chars() {
        form.push_char(c);
    }
    assert_eq!(form.price, "25.000");
    form.push_char('x');
    assert_eq!(form.price, "25.000");
    form.pop_char();
    assert_eq!(form.price, "2.500");
    for _ in 0..4 {
        form.pop_char();
    }
    assert_eq!(form.price, "");
}

#[test]
fn test_form_space_toggles_custom_date() {
    let mut form = make_form("", "");
    form.focus = FormField::CustomDate;
    form.push_char(' ');
    assert!(form.custom_date);
    form.push_char('x');
    assert!(form.custom_date);
    form.push_char(' ');
    assert!(!form.custom_date);
}

// ── Ledger commands ───────────────────────────────────────────

#[test]
fn test_add_appends_and_persists() {
    let mut ledger = Ledger::default();
    let expense = make_form("Kopi", "15.000")
        .validate(at(2024, 3, 1, 12, 0), &Utc)
        .unwrap();

    let effects = ledger.apply(Command::Add(expense.clone()));
    assert_eq!(effects, vec![Effect::Persist, Effect::Render]);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.expenses()[0], expense);
}

#[test]
fn test_delete_removes_only_matching_id() {
    let mut ledger = Ledger::new(vec![
        make_expense(1, "Kopi", dec!(15000), at(2024, 1, 1, 8, 0)),
        make_expense(2, "Roti", dec!(8000), at(2024, 1, 2, 8, 0)),
        make_expense(3, "Teh", dec!(5000), at(2024, 1, 3, 8, 0)),
    ]);

    let effects = ledger.apply(Command::Delete(2));
    assert_eq!(effects, vec![Effect::Persist, Effect::Render]);
    let ids: Vec<i64> = ledger.expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ledger.find(1).unwrap().description, "Kopi");
    assert!(ledger.find(2).is_none());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut ledger = Ledger::new(vec![make_expense(1, "Kopi", dec!(15000), at(2024, 1, 1, 8, 0))]);
    let effects = ledger.apply(Command::Delete(42));
    assert!(effects.is_empty());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_select_filter_only_renders() {
    let mut ledger = Ledger::default();
    let effects = ledger.apply(Command::SelectFilter(month("2024-01")));
    assert_eq!(effects, vec![Effect::Render]);
    assert_eq!(ledger.filter(), month("2024-01"));
}

// ── View ──────────────────────────────────────────────────────

#[test]
fn test_view_empty_collection() {
    let view = compute_view(&[], MonthFilter::All, &Utc);
    assert!(view.is_empty());
    assert!(view.months.is_empty());
    assert_eq!(view.total, Decimal::ZERO);
    assert_eq!(view.options(), vec![MonthFilter::All]);
}

#[test]
fn test_view_months_distinct_and_descending() {
    let expenses = vec![
        make_expense(1, "a", dec!(1), at(2023, 12, 5, 8, 0)),
        make_expense(2, "b", dec!(1), at(2024, 2, 5, 8, 0)),
        make_expense(3, "c", dec!(1), at(2024, 1, 5, 8, 0)),
        make_expense(4, "d", dec!(1), at(2024, 2, 20, 8, 0)),
    ];
    let months: Vec<String> = distinct_months(&expenses, &Utc)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2024-02", "2024-01", "2023-12"]);

    let view = compute_view(&expenses, MonthFilter::All, &Utc);
    assert_eq!(view.options()[0], MonthFilter::All);
    assert_eq!(view.options().len(), 4);
}

#[test]
fn test_view_entries_sorted_most_recent_first() {
    let expenses = vec![
        make_expense(1, "old", dec!(1), at(2024, 1, 1, 8, 0)),
        make_expense(2, "new", dec!(1), at(2024, 1, 30, 8, 0)),
        make_expense(3, "mid", dec!(1), at(2024, 1, 15, 8, 0)),
    ];
    let view = compute_view(&expenses, MonthFilter::All, &Utc);
    let names: Vec<&str> = view.entries.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["new", "mid", "old"]);
}

#[test]
fn test_view_total_all_and_per_month() {
    let expenses = vec![
        make_expense(1, "a", dec!(15000), at(2024, 1, 5, 8, 0)),
        make_expense(2, "b", dec!(7500), at(2024, 1, 25, 8, 0)),
        make_expense(3, "c", dec!(20000), at(2024, 2, 1, 8, 0)),
    ];
    assert_eq!(compute_view(&expenses, MonthFilter::All, &Utc).total, dec!(42500));
    assert_eq!(compute_view(&expenses, month("2024-01"), &Utc).total, dec!(22500));
    assert_eq!(compute_view(&expenses, month("2024-02"), &Utc).total, dec!(20000));
}

#[test]
fn test_view_month_uses_time_zone() {
    let expenses = vec![make_expense(1, "late", dec!(1000), at(2024, 1, 31, 20, 0))];
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    let view = compute_view(&expenses, month("2024-02"), &wib);
    assert_eq!(view.filter, month("2024-02"));
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.months, vec![MonthKey::new(2024, 2).unwrap()]);
}

#[test]
fn test_view_month_without_expenses_is_empty() {
    let expenses = vec![make_expense(1, "Kopi", dec!(15000), at(2024, 1, 5, 8, 0))];
    let view = compute_view(&expenses, month("2023-05"), &Utc);
    assert_eq!(view.filter, month("2023-05"));
    assert!(view.is_empty());
    assert_eq!(view.total, Decimal::ZERO);
    assert_eq!(view.months, vec![MonthKey::new(2024, 1).unwrap()]);
}

#[test]
fn test_view_total_saturates_on_overflow() {
    let expenses: Vec<Expense> = (0..9)
        .map(|i| {
            make_expense(
                i,
                "hand edited",
                dec!(9999999999999999999999999999),
                at(2024, 1, 5, 8, 0),
            )
        })
        .collect();
    let view = compute_view(&expenses, MonthFilter::All, &Utc);
    assert_eq!(view.entries.len(), 9);
    assert_eq!(view.total, Decimal::MAX);
    assert!(format_rupiah(view.total).starts_with("Rp79.228.162"));
}

#[test]
fn test_sum_prices() {
    assert_eq!(sum_prices(Vec::new()), Decimal::ZERO);
    assert_eq!(sum_prices([dec!(15000), dec!(2500)]), dec!(17500));
    assert_eq!(sum_prices([Decimal::MAX, dec!(1)]), Decimal::MAX);
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn test_scenario_single_coffee() {
    let now = Utc::now();
    let mut ledger = Ledger::default();
    let expense = make_form("Kopi", "15000").validate(now, &Utc).unwrap();
    ledger.apply(Command::Add(expense));

    let view = ledger.view(&Utc);
    assert_eq!(ledger.len(), 1);
    assert_eq!(format_rupiah(view.total), "Rp15.000");
    assert_eq!(view.entries.len(), 1);
    assert!(!view.is_empty());
}

#[test]
fn test_scenario_two_months() {
    let mut ledger = Ledger::default();

    let mut form = make_form("Sewa", "1.500.000");
    form.toggle_custom_date();
    form.date = "2024-01-10".into();
    form.time = "09:00".into();
    ledger.apply(Command::Add(form.validate(at(2024, 2, 20, 9, 0), &Utc).unwrap()));

    let mut form = make_form("Bensin", "50.000");
    form.toggle_custom_date();
    form.date = "2024-02-14".into();
    form.time = "18:30".into();
    ledger.apply(Command::Add(form.validate(at(2024, 2, 20, 9, 1), &Utc).unwrap()));

    ledger.apply(Command::SelectFilter(MonthFilter::All));
    assert_eq!(ledger.view(&Utc).total, dec!(1550000));

    ledger.apply(Command::SelectFilter(month("2024-01")));
    let view = ledger.view(&Utc);
    assert_eq!(view.total, dec!(1500000));
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].description, "Sewa");
    assert!(view.entries.iter().all(|e| e.description != "Bensin"));
}
