//! Service layer for Pocketbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields and record lifecycle.

pub mod budget;
pub mod expense;
pub mod period;
pub mod shared;

pub use budget::BudgetService;
pub use expense::{CreateExpenseInput, ExpenseService};
pub use period::{Clock, FixedClock, PeriodService, SystemClock};
pub use shared::{CreateSharedInput, SharedExpenseService};
