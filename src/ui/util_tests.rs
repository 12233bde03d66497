#![allow(clippy::unwrap_used)]

use chrono::{FixedOffset, TimeZone, Utc};
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{MonthFilter, MonthKey};

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("nasi goreng spesial", 6), "nasi …");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── format_rupiah ─────────────────────────────────────────────

#[test]
fn test_format_rupiah_basic() {
    assert_eq!(format_rupiah(dec!(15000)), "Rp15.000");
}

#[test]
fn test_format_rupiah_small() {
    assert_eq!(format_rupiah(dec!(500)), "Rp500");
    assert_eq!(format_rupiah(dec!(0)), "Rp0");
}

#[test]
fn test_format_rupiah_large() {
    assert_eq!(format_rupiah(dec!(1234567890)), "Rp1.234.567.890");
}

#[test]
fn test_format_rupiah_rounds_to_whole() {
    assert_eq!(format_rupiah(dec!(1499.5)), "Rp1.500");
    assert_eq!(format_rupiah(dec!(1499.49)), "Rp1.499");
    assert_eq!(format_rupiah(dec!(15000.0)), "Rp15.000");
}

#[test]
fn test_format_rupiah_negative() {
    assert_eq!(format_rupiah(dec!(-2500)), "-Rp2.500");
    assert_eq!(format_rupiah(dec!(-0.2)), "Rp0");
}

// ── dates ─────────────────────────────────────────────────────

#[test]
fn test_format_long_datetime_pads() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 5, 9, 5, 0).unwrap();
    assert_eq!(format_long_datetime(&dt), "05 Januari 2024 pukul 09.05");
}

#[test]
fn test_format_long_datetime_in_zone() {
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    let dt = Utc
        .with_ymd_and_hms(2024, 12, 31, 20, 15, 0)
        .unwrap()
        .with_timezone(&wib);
    assert_eq!(format_long_datetime(&dt), "01 Januari 2025 pukul 03.15");
}

#[test]
fn test_format_clock() {
    // 2024-01-15 was a Monday
    let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
    assert_eq!(format_clock(&dt), "Senin, 15 Januari 2024 pukul 10.30.45");

    let sunday = Utc.with_ymd_and_hms(2024, 8, 4, 0, 0, 7).unwrap();
    assert_eq!(format_clock(&sunday), "Minggu, 4 Agustus 2024 pukul 00.00.07");
}

#[test]
fn test_month_and_filter_labels() {
    let key = MonthKey::new(2024, 3).unwrap();
    assert_eq!(month_label(key), "Maret 2024");
    assert_eq!(filter_label(MonthFilter::Month(key)), "Maret 2024");
    assert_eq!(filter_label(MonthFilter::All), "Semua Bulan");
}

// ── cursor helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_cursor_after_shrink() {
    let (mut index, mut scroll) = (5, 4);
    clamp_cursor(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));

    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}
