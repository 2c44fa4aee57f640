//! Reports module for Pocketbook
//!
//! Spending aggregation over expense snapshots, the settlement ledger for
//! shared expenses, and the yearly dashboard built on both.

pub mod aggregation;
pub mod dashboard;
pub mod settlement;

pub use aggregation::{
    chart_series, AggregationEngine, BudgetAlert, ChartSeries, MonthTotal, MonthlyBreakdown,
};
pub use dashboard::{DashboardReport, FULL_YEAR_LABEL};
pub use settlement::{net_balances, record_contribution, Balance, LedgerSummary};
