//! Expense display formatting

use crate::models::{Budget, Expense, Money};
use crate::reports::BudgetAlert;

use super::report::{separator, truncate};

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, date_format: &str) -> String {
    let marker = if expense.is_deleted() { "✗" } else { " " };
    format!(
        "{} {:<12} {:<10} {:<16} {:>12}  {}",
        marker,
        expense.id.to_string(),
        expense.date.format(date_format).to_string(),
        truncate(&expense.category, 16),
        expense.amount,
        truncate(&expense.description, 30)
    )
}

/// Format a list of expenses with a total line
pub fn format_expense_list(expenses: &[Expense], date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<12} {:<10} {:<16} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&separator(72));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, date_format));
        output.push('\n');
    }

    let total: Money = expenses
        .iter()
        .filter(|e| !e.is_deleted())
        .map(|e| e.amount)
        .sum();
    output.push_str(&separator(72));
    output.push('\n');
    output.push_str(&format!(
        "  {:<40} {:>12}  ({} expenses)\n",
        "Total",
        total,
        expenses.len()
    ));

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}\n", expense.date));
    output.push_str(&format!("Amount:   {}\n", expense.amount));
    output.push_str(&format!("Category: {}\n", expense.category));
    if !expense.description.is_empty() {
        output.push_str(&format!("Note:     {}\n", expense.description));
    }
    if !expense.payment_mode.is_empty() {
        output.push_str(&format!("Paid via: {}\n", expense.payment_mode));
    }
    output.push_str(&format!("Status:   {}\n", expense.status));

    output
}

pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = format!("{:<24} {:>14}\n", "Category", "Monthly Limit");
    output.push_str(&separator(39));
    output.push('\n');
    for budget in budgets {
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            truncate(&budget.category, 24),
            budget.monthly_limit
        ));
    }
    output
}

pub fn format_budget_alerts(alerts: &[BudgetAlert]) -> String {
    if alerts.is_empty() {
        return "All categories within budget.\n".to_string();
    }

    let mut output = format!(
        "{:<20} {:>12} {:>12} {:>12}\n",
        "Category", "Limit", "Spent", "Over By"
    );
    output.push_str(&separator(59));
    output.push('\n');
    for alert in alerts {
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}\n",
            truncate(&alert.category, 20),
            alert.limit,
            alert.spent,
            alert.overage()
        ));
    }
    output
}
