mod schema;

pub(crate) use schema::EXPENSES_SLOT;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::models::Expense;

/// Local key-value store backed by a single SQLite file.
///
/// The expense collection lives in one slot as a JSON array; every save
/// rewrites the whole slot.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Slots ─────────────────────────────────────────────────

    pub(crate) fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub(crate) fn set_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub(crate) fn clear_slot(&self, key: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Read the expense collection. A missing slot or contents that do not
    /// parse yield an empty collection; only database failures are errors.
    pub(crate) fn load_expenses(&self) -> Result<Vec<Expense>> {
        let Some(raw) = self.get_slot(schema::EXPENSES_SLOT)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Option<Vec<Expense>>>(&raw) {
            Ok(expenses) => {
                let expenses = expenses.unwrap_or_default();
                tracing::debug!(count = expenses.len(), "loaded expenses");
                Ok(expenses)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored expenses are unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    pub(crate) fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let payload = serde_json::to_string(expenses).context("Failed to serialize expenses")?;
        self.set_slot(schema::EXPENSES_SLOT, &payload)
            .context("Failed to save expenses")?;
        tracing::debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }
}
