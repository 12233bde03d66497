use chrono::{DateTime, Datelike, TimeZone, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::group_thousands;
use crate::models::{MonthFilter, MonthKey};

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

pub(crate) const ALL_MONTHS_LABEL: &str = "Semua Bulan";
pub(crate) const EMPTY_LIST_MESSAGE: &str = "Tumben hemat";

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Format an amount as Indonesian rupiah with no fractional digits.
/// e.g. `15000` → `"Rp15.000"`
pub(crate) fn format_rupiah(val: Decimal) -> String {
    let rounded = val
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc();
    let grouped = group_thousands(&rounded.to_string());

    if val < Decimal::ZERO && !rounded.is_zero() {
        format!("-Rp{grouped}")
    } else {
        format!("Rp{grouped}")
    }
}

/// Long form used in the expense list.
/// e.g. `"05 Januari 2024 pukul 09.05"`
pub(crate) fn format_long_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!(
        "{:02} {} {} pukul {:02}.{:02}",
        dt.day(),
        month_name(dt.month()),
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}

/// Header clock.
/// e.g. `"Senin, 15 Januari 2024 pukul 10.30.45"`
pub(crate) fn format_clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let weekday = WEEKDAY_NAMES[dt.weekday().num_days_from_monday() as usize];
    format!(
        "{weekday}, {} {} {} pukul {:02}.{:02}.{:02}",
        dt.day(),
        month_name(dt.month()),
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// e.g. `"Januari 2024"`
pub(crate) fn month_label(key: MonthKey) -> String {
    format!("{} {}", month_name(key.month), key.year)
}

pub(crate) fn filter_label(filter: MonthFilter) -> String {
    match filter {
        MonthFilter::All => ALL_MONTHS_LABEL.to_string(),
        MonthFilter::Month(key) => month_label(key),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Pull a cursor back inside a list that may have shrunk.
pub(crate) fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
