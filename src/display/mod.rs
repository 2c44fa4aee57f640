//! Display formatting for terminal output
//!
//! Provides utilities for formatting records and reports for terminal
//! display, including tables, bar charts and balance views.

pub mod expense;
pub mod report;
pub mod shared;

pub use expense::{
    format_budget_alerts, format_budget_list, format_expense_details, format_expense_list,
};
pub use report::{format_breakdown, format_chart};
pub use shared::{format_balances, format_shared_details, format_shared_list};
