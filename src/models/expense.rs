use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthKey;

/// One logged spending event. This is the exact shape stored in the
/// `expenses` slot: `{id, description, price, date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Creation time in Unix milliseconds.
    pub id: i64,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub date: DateTime<Utc>,
}

impl Expense {
    pub fn new(id: i64, description: String, price: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            price,
            date,
        }
    }

    /// Calendar month of this expense as seen from `tz`.
    pub fn month_key<Tz: TimeZone>(&self, tz: &Tz) -> MonthKey {
        MonthKey::of(&self.date.with_timezone(tz))
    }
}
