mod form;
mod price;
mod view;

pub(crate) use form::{ExpenseForm, FormField};
pub(crate) use price::group_thousands;
pub(crate) use view::{compute_view, sum_prices, View};

use chrono::TimeZone;

use crate::models::{Expense, MonthFilter};

/// A user intent against the expense collection.
#[derive(Debug, Clone)]
pub(crate) enum Command {
    Add(Expense),
    Delete(i64),
    SelectFilter(MonthFilter),
}

/// Follow-up work a handled command asks its caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Write the whole collection to the storage slot.
    Persist,
    /// Recompute the view and redraw.
    Render,
}

/// Owns the in-memory expense collection and the current filter.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    expenses: Vec<Expense>,
    filter: MonthFilter,
}

impl Ledger {
    pub(crate) fn new(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            filter: MonthFilter::All,
        }
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn filter(&self) -> MonthFilter {
        self.filter
    }

    pub(crate) fn len(&self) -> usize {
        self.expenses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub(crate) fn find(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Apply a command. The returned effects are empty when nothing changed.
    ///
    /// Ids are the creation millisecond and are not checked for collisions;
    /// two records sharing an id are both removed by a delete.
    pub(crate) fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Add(expense) => {
                tracing::debug!(id = expense.id, price = %expense.price, "adding expense");
                self.expenses.push(expense);
                vec![Effect::Persist, Effect::Render]
            }
            Command::Delete(id) => {
                let before = self.expenses.len();
                self.expenses.retain(|e| e.id != id);
                if self.expenses.len() == before {
                    tracing::debug!(id, "delete ignored, no such expense");
                    return Vec::new();
                }
                tracing::debug!(id, "deleted expense");
                vec![Effect::Persist, Effect::Render]
            }
            Command::SelectFilter(filter) => {
                self.filter = filter;
                vec![Effect::Render]
            }
        }
    }

    pub(crate) fn view<Tz: TimeZone>(&self, tz: &Tz) -> View {
        compute_view(&self.expenses, self.filter, tz)
    }
}

#[cfg(test)]
mod tests;
