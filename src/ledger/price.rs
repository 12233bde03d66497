use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9]+").expect("literal pattern compiles"));

/// Drop everything that is not an ASCII digit.
pub(crate) fn strip_non_digits(raw: &str) -> String {
    NON_DIGITS.replace_all(raw, "").into_owned()
}

/// Group a run of ASCII digits in threes with `.` (id-ID style).
/// Leading zeros are dropped the way a numeric parse would drop them.
/// e.g. `"1234567"` → `"1.234.567"`
pub(crate) fn group_thousands(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    trimmed
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".")
}

/// Live reformat of the price field after a keystroke.
/// Returns the empty string when no digits are left.
pub(crate) fn format_price_input(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    if digits.is_empty() {
        String::new()
    } else {
        group_thousands(&digits)
    }
}

/// Largest accepted price, 2^53 rupiah. Prices are stored as JSON numbers,
/// which stay exact up to this bound.
pub(crate) const MAX_PRICE_RUPIAH: i64 = 1 << 53;

/// Numeric value of a price field. `None` when there are no digits or the
/// number does not fit.
pub(crate) fn parse_price(raw: &str) -> Option<Decimal> {
    let digits = strip_non_digits(raw);
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(&digits).ok()
}
