//! Shared expense display formatting
//!
//! List views for shared expenses and the balance table for the ledger.

use crate::models::SharedExpense;
use crate::reports::LedgerSummary;

use super::report::{format_money_colored, separator, truncate};

/// Format a single shared expense as a list row
pub fn format_shared_row(shared: &SharedExpense, date_format: &str) -> String {
    let status = if shared.is_settled() { "✓" } else { " " };
    format!(
        "{} {:<12} {:<10} {:<20} {:>12} {:<12} {:>10}",
        status,
        shared.id.to_string(),
        shared.date.format(date_format).to_string(),
        truncate(&shared.title, 20),
        shared.total_amount,
        truncate(&shared.paid_by, 12),
        shared.per_person_amount
    )
}

/// Format a list of shared expenses
pub fn format_shared_list(records: &[SharedExpense], date_format: &str) -> String {
    if records.is_empty() {
        return "No shared expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<12} {:<10} {:<20} {:>12} {:<12} {:>10}\n",
        "ID", "Date", "Title", "Total", "Paid By", "Each"
    ));
    output.push_str(&separator(84));
    output.push('\n');

    for shared in records {
        output.push_str(&format_shared_row(shared, date_format));
        output.push('\n');
        if !shared.participants.is_empty() {
            output.push_str(&format!("    with {}\n", shared.participants.join(", ")));
        }
    }

    output
}

/// Format shared expense details for display
pub fn format_shared_details(shared: &SharedExpense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Shared:   {}\n", shared.id));
    output.push_str(&format!("Title:    {}\n", shared.title));
    output.push_str(&format!("Date:     {}\n", shared.date));
    output.push_str(&format!("Total:    {}\n", shared.total_amount));
    output.push_str(&format!("Paid by:  {}\n", shared.paid_by));
    if !shared.participants.is_empty() {
        output.push_str(&format!("Sharing:  {}\n", shared.participants.join(", ")));
    }
    output.push_str(&format!(
        "Each:     {} ({} shares)\n",
        shared.per_person_amount,
        shared.share_count()
    ));
    let drift = shared.rounding_drift();
    if !drift.is_zero() {
        output.push_str(&format!("Rounding: {} not covered by the shares\n", drift));
    }
    output.push_str(&format!("Status:   {}\n", shared.settlement));

    output
}

/// Format net balances: who is owed and who owes
pub fn format_balances(summary: &LedgerSummary, colored: bool) -> String {
    if summary.is_empty() {
        return "Nothing outstanding.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<24} {:>14}\n", "Person", "Balance"));
    output.push_str(&separator(39));
    output.push('\n');

    for (person, amount) in summary.balances() {
        let rendered = if colored {
            format_money_colored(*amount)
        } else {
            amount.to_string()
        };
        output.push_str(&format!("{:<24} {:>14}\n", truncate(person, 24), rendered));
    }

    let creditors = summary.creditors();
    let debtors = summary.debtors();
    if !creditors.is_empty() || !debtors.is_empty() {
        output.push('\n');
    }
    for balance in creditors {
        output.push_str(&format!("{} is owed {}\n", balance.person, balance.amount));
    }
    for balance in debtors {
        output.push_str(&format!("{} owes {}\n", balance.person, balance.amount.abs()));
    }

    output
}
