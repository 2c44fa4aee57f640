//! JSON export
//!
//! Full record export with schema versioning, and the dashboard as JSON.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PocketbookResult;
use crate::models::{Budget, Expense, SharedExpense};
use crate::reports::DashboardReport;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every stored record in one document
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub shared_expenses: Vec<SharedExpense>,
    pub budgets: Vec<Budget>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub shared_expense_count: usize,
    pub budget_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> PocketbookResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let shared_expenses = storage.shared.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            shared_expense_count: shared_expenses.len(),
            budget_count: budgets.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            shared_expenses,
            budgets,
            metadata,
        })
    }
}

/// Export every record as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> PocketbookResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    tracing::debug!(expenses = export.metadata.expense_count, "exported records to json");
    Ok(())
}

/// Export the dashboard as pretty-printed JSON
pub fn export_dashboard_json<W: Write>(
    report: &DashboardReport,
    writer: &mut W,
) -> PocketbookResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
