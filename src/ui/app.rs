use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use crate::db::Database;
use crate::ledger::{Command, Effect, ExpenseForm, Ledger, View};
use crate::models::{Expense, MonthFilter};
use crate::ui::util::{clamp_cursor, format_clock};

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Form,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
    Alert,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
            Self::Alert => write!(f, "ALERT"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) focus: Focus,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) clock: String,

    pub(crate) ledger: Ledger,
    pub(crate) form: ExpenseForm,
    pub(crate) view: View,

    // Expense list cursor
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Confirmation / alert
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
    pub(crate) alert_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: Ledger) -> Self {
        let now = Local::now();
        let mut app = Self {
            running: true,
            focus: Focus::Form,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            clock: format_clock(&now),

            ledger,
            form: ExpenseForm::new(now.naive_local()),
            view: View::default(),

            expense_index: 0,
            expense_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),
            alert_message: String::new(),

            visible_rows: 20,
        };
        app.refresh_view();
        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Show a blocking message; any key dismisses it.
    pub(crate) fn alert(&mut self, msg: impl Into<String>) {
        self.alert_message = msg.into();
        self.input_mode = InputMode::Alert;
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert_message.clear();
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn tick_clock(&mut self, now: DateTime<Local>) {
        self.clock = format_clock(&now);
    }

    /// Recompute the derived view and keep the cursor inside it. A selected
    /// month with no expenses left falls back to all months.
    pub(crate) fn refresh_view(&mut self) {
        self.view = self.ledger.view(&Local);
        if let MonthFilter::Month(key) = self.view.filter {
            if !self.view.months.contains(&key) {
                tracing::debug!(month = %key, "selected month is empty, showing all");
                self.ledger.apply(Command::SelectFilter(MonthFilter::All));
                self.view = self.ledger.view(&Local);
            }
        }
        clamp_cursor(
            &mut self.expense_index,
            &mut self.expense_scroll,
            self.view.entries.len(),
        );
    }

    /// Run a command against the ledger and carry out its effects.
    ///
    /// A failed save is returned after the view is refreshed; the in-memory
    /// change is kept either way.
    pub(crate) fn dispatch(&mut self, command: Command, db: &mut Database) -> Result<()> {
        let mut persisted: Result<()> = Ok(());
        for effect in self.ledger.apply(command) {
            match effect {
                Effect::Persist => persisted = db.save_expenses(self.ledger.expenses()),
                Effect::Render => self.refresh_view(),
            }
        }
        persisted
    }

    fn report_saved(&mut self, result: Result<()>, msg: String) {
        match result {
            Ok(()) => self.set_status(msg),
            Err(e) => {
                tracing::error!(error = ?e, "failed to persist expenses");
                self.set_status(format!("Gagal menyimpan: {e:#}"));
            }
        }
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.view.entries.get(self.expense_index)
    }

    // ── Form ──────────────────────────────────────────────────

    pub(crate) fn submit_form(&mut self, db: &mut Database) {
        self.submit_form_at(Utc::now(), db);
    }

    pub(crate) fn submit_form_at(&mut self, now: DateTime<Utc>, db: &mut Database) {
        match self.form.validate(now, &Local) {
            Ok(expense) => {
                let description = expense.description.clone();
                let saved = self.dispatch(Command::Add(expense), db);
                self.form.reset(now.with_timezone(&Local).naive_local());
                self.focus = Focus::Form;
                self.report_saved(saved, format!("Tersimpan: {description}"));
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected expense form");
                self.alert(e.to_string());
            }
        }
    }

    // ── Deletion ──────────────────────────────────────────────

    pub(crate) fn request_delete(&mut self) {
        let Some((id, description)) = self
            .selected_expense()
            .map(|e| (e.id, e.description.clone()))
        else {
            self.set_status("Tidak ada pengeluaran dipilih");
            return;
        };
        self.confirm_message = format!("Yakin hapus '{description}'?");
        self.pending_action = Some(PendingAction::DeleteExpense { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, db: &mut Database) {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteExpense { id, description } => {
                    let saved = self.dispatch(Command::Delete(id), db);
                    self.report_saved(saved, format!("Dihapus: {description}"));
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Dibatalkan");
    }

    // ── Month filter ──────────────────────────────────────────

    pub(crate) fn select_filter(&mut self, filter: MonthFilter, db: &mut Database) -> Result<()> {
        self.dispatch(Command::SelectFilter(filter), db)?;
        self.expense_index = 0;
        self.expense_scroll = 0;
        Ok(())
    }

    /// Step through the filter options; positive `delta` moves towards
    /// older months.
    pub(crate) fn cycle_filter(&mut self, delta: i32, db: &mut Database) -> Result<()> {
        let options = self.view.options();
        let current = options
            .iter()
            .position(|f| *f == self.view.filter)
            .unwrap_or(0) as i32;
        let len = options.len() as i32;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_filter(options[next], db)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
