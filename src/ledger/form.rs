use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use super::price;
use crate::models::Expense;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Mohon isi deskripsi dan harga dengan benar.")]
    EmptyDescription,
    #[error("Mohon isi deskripsi dan harga dengan benar.")]
    InvalidPrice,
    #[error("Mohon isi tanggal dan waktu custom.")]
    MissingCustomDate,
    #[error("Tanggal atau waktu custom tidak valid: {0}")]
    InvalidCustomDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Price,
    CustomDate,
    Date,
    Time,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Description => write!(f, "Deskripsi"),
            Self::Price => write!(f, "Harga"),
            Self::CustomDate => write!(f, "Tanggal custom"),
            Self::Date => write!(f, "Tanggal"),
            Self::Time => write!(f, "Waktu"),
        }
    }
}

/// Raw contents of the add-expense form.
///
/// The date and time inputs only take part in validation while
/// `custom_date` is on; otherwise the submission time is used.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) description: String,
    pub(crate) price: String,
    pub(crate) custom_date: bool,
    pub(crate) date: String,
    pub(crate) time: String,
    pub(crate) focus: FormField,
}

impl ExpenseForm {
    pub(crate) fn new(now_local: NaiveDateTime) -> Self {
        let mut form = Self {
            description: String::new(),
            price: String::new(),
            custom_date: false,
            date: String::new(),
            time: String::new(),
            focus: FormField::Description,
        };
        form.seed_date_time(now_local);
        form
    }

    /// Fields reachable with Tab, in order. Date and time are hidden unless
    /// the custom date toggle is on.
    pub(crate) fn visible_fields(&self) -> &'static [FormField] {
        if self.custom_date {
            &[
                FormField::Description,
                FormField::Price,
                FormField::CustomDate,
                FormField::Date,
                FormField::Time,
            ]
        } else {
            &[
                FormField::Description,
                FormField::Price,
                FormField::CustomDate,
            ]
        }
    }

    /// Move focus forward. Returns false when focus would wrap past the
    /// last field, leaving focus where it was.
    pub(crate) fn focus_next(&mut self) -> bool {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        match fields.get(idx + 1) {
            Some(next) => {
                self.focus = *next;
                true
            }
            None => false,
        }
    }

    pub(crate) fn focus_prev(&mut self) -> bool {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        if idx == 0 {
            return false;
        }
        self.focus = fields[idx - 1];
        true
    }

    pub(crate) fn toggle_custom_date(&mut self) {
        self.custom_date = !self.custom_date;
        if !self.custom_date && matches!(self.focus, FormField::Date | FormField::Time) {
            self.focus = FormField::CustomDate;
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Description => self.description.push(c),
            FormField::Price => {
                self.price.push(c);
                self.price = price::format_price_input(&self.price);
            }
            FormField::CustomDate => {
                if c == ' ' {
                    self.toggle_custom_date();
                }
            }
            FormField::Date => self.date.push(c),
            FormField::Time => self.time.push(c),
        }
    }

    pub(crate) fn pop_char(&mut self) {
        match self.focus {
            FormField::Description => {
                self.description.pop();
            }
            FormField::Price => {
                self.price.pop();
                self.price = price::format_price_input(&self.price);
            }
            FormField::CustomDate => {}
            FormField::Date => {
                self.date.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
        }
    }

    /// Check the form and build the record it describes.
    ///
    /// `now` is the submission moment; it becomes both the id (in
    /// milliseconds) and, without a custom date, the expense date. Custom
    /// date and time are read as wall-clock time in `tz`.
    pub(crate) fn validate<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<Expense, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let max = Decimal::from(price::MAX_PRICE_RUPIAH);
        let price = price::parse_price(&self.price)
            .filter(|p| *p > Decimal::ZERO && *p <= max)
            .ok_or(ValidationError::InvalidPrice)?;

        let date = if self.custom_date {
            self.custom_timestamp(tz)?
        } else {
            now
        };

        Ok(Expense::new(
            now.timestamp_millis(),
            description.to_string(),
            price,
            date,
        ))
    }

    fn custom_timestamp<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() {
            return Err(ValidationError::MissingCustomDate);
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidCustomDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidCustomDate(time.to_string()))?;
        let naive = date.and_time(time);

        tz.from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| ValidationError::InvalidCustomDate(naive.to_string()))
    }

    /// Clear the form after a successful submission: empty inputs, focus on
    /// the description, custom date hidden, date/time re-seeded to `now_local`.
    pub(crate) fn reset(&mut self, now_local: NaiveDateTime) {
        self.description.clear();
        self.price.clear();
        self.custom_date = false;
        self.focus = FormField::Description;
        self.seed_date_time(now_local);
    }

    fn seed_date_time(&mut self, now_local: NaiveDateTime) {
        self.date = now_local.format(DATE_FORMAT).to_string();
        self.time = now_local.format(TIME_FORMAT).to_string();
    }
}
