//! CSV export
//!
//! Writes expenses, shared expenses and chart series as spreadsheet-friendly
//! CSV. Amounts are plain decimals without a currency symbol.

use std::io::Write;

use serde::Serialize;

use crate::error::PocketbookResult;
use crate::models::{Expense, SharedExpense};
use crate::reports::ChartSeries;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Payment Mode")]
    payment_mode: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Serialize)]
struct SharedRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Total")]
    total: String,
    #[serde(rename = "Paid By")]
    paid_by: &'a str,
    #[serde(rename = "Participants")]
    participants: String,
    #[serde(rename = "Per Person")]
    per_person: String,
    #[serde(rename = "Settled On")]
    settled_on: String,
}

/// Export expenses to CSV, one row per record
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> PocketbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for expense in expenses {
        csv.serialize(ExpenseRow {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.to_string(),
            category: &expense.category,
            description: &expense.description,
            payment_mode: &expense.payment_mode,
            amount: expense.amount.to_decimal_string(),
            status: expense.status.to_string(),
        })?;
    }

    csv.flush()?;
    tracing::debug!(rows = expenses.len(), "exported expenses to csv");
    Ok(())
}

/// Export shared expenses to CSV; participants are joined with ';'
pub fn export_shared_csv<W: Write>(records: &[SharedExpense], writer: W) -> PocketbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for shared in records {
        csv.serialize(SharedRow {
            id: shared.id.as_uuid().to_string(),
            date: shared.date.to_string(),
            title: &shared.title,
            total: shared.total_amount.to_decimal_string(),
            paid_by: &shared.paid_by,
            participants: shared.participants.join(";"),
            per_person: shared.per_person_amount.to_decimal_string(),
            settled_on: shared
                .settlement
                .settled_at()
                .map(|d| d.to_string())
                .unwrap_or_default(),
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Export a chart series as (label, value) rows
pub fn export_chart_csv<W: Write>(
    series: &ChartSeries,
    label_header: &str,
    writer: W,
) -> PocketbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([label_header, "Amount"])?;
    for (label, value) in series.iter() {
        csv.write_record([label, value.to_decimal_string().as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::chart_series;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn test_export_expenses() {
        let expenses = vec![Expense::with_details(
            Money::from_cents(1999),
            "Food",
            date(),
            "Pizza, large",
            "cash",
        )];

        let mut buffer = Vec::new();
        export_expenses_csv(&expenses, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Date,Category,Description,Payment Mode,Amount,Status")
        );
        let row = lines.next().unwrap();
        assert!(row.contains(",2025-04-02,Food,\"Pizza, large\",cash,19.99,Active"));
    }

    #[test]
    fn test_export_shared() {
        let mut shared = SharedExpense::new("Cab", Money::from_cents(3000), "A", ["B", "C"], date());
        shared.settle(date()).unwrap();

        let mut buffer = Vec::new();
        export_shared_csv(&[shared], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains(",Cab,30.00,A,B;C,10.00,2025-04-02"));
    }

    #[test]
    fn test_export_chart() {
        let series = chart_series([("Rent", Money::from_cents(120000))]);
        let mut buffer = Vec::new();
        export_chart_csv(&series, "Category", &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Category,Amount\nRent,1200.00\n");
    }
}
