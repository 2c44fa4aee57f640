//! Core data models for Pocketbook
//!
//! Expenses, monthly budgets and shared expenses, plus the money and calendar
//! value types they are built from.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod shared;

pub use budget::Budget;
pub use expense::{Expense, RecordStatus};
pub use ids::{BudgetId, ExpenseId, SharedExpenseId};
pub use money::Money;
pub use period::{month_name, parse_date, validate_month, YearMonth, MONTH_NAMES};
pub use shared::{parse_participants, Settlement, SharedExpense};
