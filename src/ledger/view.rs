use chrono::TimeZone;
use rust_decimal::Decimal;

use crate::models::{Expense, MonthFilter, MonthKey};

/// Everything the expense pane shows, derived from the collection and the
/// selected filter. Recomputed after every change, never cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct View {
    pub(crate) filter: MonthFilter,
    /// Distinct months, most recent first.
    pub(crate) months: Vec<MonthKey>,
    /// Working subset, most recent first.
    pub(crate) entries: Vec<Expense>,
    pub(crate) total: Decimal,
}

impl View {
    /// Filter choices in display order, "all months" first.
    pub(crate) fn options(&self) -> Vec<MonthFilter> {
        std::iter::once(MonthFilter::All)
            .chain(self.months.iter().copied().map(MonthFilter::Month))
            .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distinct year-months present in `expenses`, sorted descending.
pub(crate) fn distinct_months<Tz: TimeZone>(expenses: &[Expense], tz: &Tz) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = expenses.iter().map(|e| e.month_key(tz)).collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

/// Sum of `prices`. Saturates at `Decimal::MAX` rather than overflowing,
/// which only a hand-edited slot can reach.
pub(crate) fn sum_prices(prices: impl IntoIterator<Item = Decimal>) -> Decimal {
    prices
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or_else(|| {
            tracing::warn!("expense total overflowed, showing the maximum");
            Decimal::MAX
        })
}

/// Derive the expense pane for `filter`.
///
/// Months are taken in `tz`, the display timezone, not in UTC: an expense
/// at 01:00 WIB on the 1st belongs to the new month even though its UTC
/// date is still in the previous one.
///
/// The filter is applied as given. A month with no expenses yields an empty
/// list and a zero total; falling back to `All` is the caller's choice.
pub(crate) fn compute_view<Tz: TimeZone>(
    expenses: &[Expense],
    filter: MonthFilter,
    tz: &Tz,
) -> View {
    let months = distinct_months(expenses, tz);

    let mut entries: Vec<Expense> = expenses
        .iter()
        .filter(|e| filter.matches(e.month_key(tz)))
        .cloned()
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let total = sum_prices(entries.iter().map(|e| e.price));

    View {
        filter,
        months,
        entries,
        total,
    }
}
