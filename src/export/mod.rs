//! Export module for Pocketbook
//!
//! - CSV: expenses, shared expenses and chart series (spreadsheet-compatible)
//! - JSON: full record export and the dashboard

pub mod csv;
pub mod json;

pub use self::csv::{export_chart_csv, export_expenses_csv, export_shared_csv};
pub use json::{export_dashboard_json, export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
