use anyhow::{Context, Result};
use chrono::TimeZone;
use std::io;
use std::path::Path;

use crate::models::Expense;

pub(crate) const HEADERS: [&str; 5] = ["id", "date", "time", "description", "price"];

pub(crate) struct CsvExporter;

impl CsvExporter {
    /// Write `expenses` as CSV, one row per expense in the given order.
    /// Dates and times are rendered as wall-clock values in `tz`.
    pub(crate) fn write<W, Tz>(writer: W, expenses: &[Expense], tz: &Tz) -> Result<usize>
    where
        W: io::Write,
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADERS)
            .context("Failed to write CSV header")?;

        for expense in expenses {
            let local = expense.date.with_timezone(tz);
            wtr.write_record([
                expense.id.to_string(),
                local.format("%Y-%m-%d").to_string(),
                local.format("%H:%M").to_string(),
                expense.description.clone(),
                expense.price.normalize().to_string(),
            ])
            .with_context(|| format!("Failed to write expense {}", expense.id))?;
        }

        wtr.flush().context("Failed to flush CSV output")?;
        Ok(expenses.len())
    }

    pub(crate) fn write_to_path<Tz>(path: &Path, expenses: &[Expense], tz: &Tz) -> Result<usize>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let count = Self::write(file, expenses, tz)?;
        tracing::info!(count, path = %path.display(), "exported expenses");
        Ok(count)
    }
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
