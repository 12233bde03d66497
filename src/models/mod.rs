mod expense;
mod month;

pub use expense::Expense;
pub use month::{MonthFilter, MonthKey};
