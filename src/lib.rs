//! Pocketbook - personal expense analytics and shared-expense settlement
//!
//! This library records personal expenses, monthly category budgets and
//! expenses shared between people, and computes the analytics over them:
//! monthly, yearly and category rollups, the monthly breakdown, budget alerts
//! and the net balances of who owes whom.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budgets, shared expenses, money)
//! - `storage`: JSON file storage layer and the record source seam
//! - `services`: Record lifecycle and calendar periods
//! - `reports`: Aggregation engine, settlement ledger and dashboard
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `pocketbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbook::config::paths::PocketbookPaths;
//! use pocketbook::reports::DashboardReport;
//! use pocketbook::services::SystemClock;
//! use pocketbook::storage::Storage;
//!
//! let mut storage = Storage::new(PocketbookPaths::new()?)?;
//! storage.load_all()?;
//! let dashboard = DashboardReport::generate(&storage, None, &SystemClock)?;
//! println!("{}", dashboard.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PocketbookError, PocketbookResult};
