//! Storage layer for Pocketbook
//!
//! JSON file storage with atomic writes. `Storage` is the record source the
//! reports read snapshots from; the [`RecordSource`] trait is the seam that
//! keeps the reports independent of where records live.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod query;
pub mod shared;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use query::{ExpenseQuery, SettlementFilter, SharedQuery, SortOrder};
pub use shared::SharedExpenseRepository;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::paths::PocketbookPaths;
use crate::error::PocketbookError;
use crate::models::{Budget, Expense, SharedExpense, SharedExpenseId};

/// Queryable repository of expense, budget and shared-expense records
pub trait RecordSource {
    /// Expenses matching `query`, sorted by date
    fn query_expenses(
        &self,
        query: &ExpenseQuery,
        order: SortOrder,
    ) -> Result<Vec<Expense>, PocketbookError>;

    /// Every expense record, deleted and shared included
    fn all_expenses(&self) -> Result<Vec<Expense>, PocketbookError>;

    fn distinct_years(&self) -> Result<BTreeSet<i32>, PocketbookError>;

    fn distinct_categories(&self) -> Result<BTreeSet<String>, PocketbookError>;

    /// Budgets in their stored order
    fn query_budgets(&self) -> Result<Vec<Budget>, PocketbookError>;

    /// Shared expenses matching `query`, sorted by creation time
    fn query_shared(
        &self,
        query: &SharedQuery,
        order: SortOrder,
    ) -> Result<Vec<SharedExpense>, PocketbookError>;

    fn distinct_participants(&self) -> Result<BTreeSet<String>, PocketbookError>;

    fn mark_settled(
        &self,
        id: SharedExpenseId,
        settled_at: NaiveDate,
    ) -> Result<SharedExpense, PocketbookError>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PocketbookPaths,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
    pub shared: SharedExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PocketbookPaths) -> Result<Self, PocketbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            shared: SharedExpenseRepository::new(paths.shared_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &PocketbookPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PocketbookError> {
        self.expenses.load()?;
        self.budgets.load()?;
        self.shared.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PocketbookError> {
        self.expenses.save()?;
        self.budgets.save()?;
        self.shared.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

impl RecordSource for Storage {
    fn query_expenses(
        &self,
        query: &ExpenseQuery,
        order: SortOrder,
    ) -> Result<Vec<Expense>, PocketbookError> {
        self.expenses.query(query, order)
    }

    fn all_expenses(&self) -> Result<Vec<Expense>, PocketbookError> {
        self.expenses.get_all()
    }

    fn distinct_years(&self) -> Result<BTreeSet<i32>, PocketbookError> {
        self.expenses.distinct_years()
    }

    fn distinct_categories(&self) -> Result<BTreeSet<String>, PocketbookError> {
        self.expenses.distinct_categories()
    }

    fn query_budgets(&self) -> Result<Vec<Budget>, PocketbookError> {
        self.budgets.get_all()
    }

    fn query_shared(
        &self,
        query: &SharedQuery,
        order: SortOrder,
    ) -> Result<Vec<SharedExpense>, PocketbookError> {
        self.shared.query(query, order)
    }

    fn distinct_participants(&self) -> Result<BTreeSet<String>, PocketbookError> {
        self.shared.distinct_participants()
    }

    fn mark_settled(
        &self,
        id: SharedExpenseId,
        settled_at: NaiveDate,
    ) -> Result<SharedExpense, PocketbookError> {
        let settled = self.shared.mark_settled(id, settled_at)?;
        self.shared.save()?;
        Ok(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_mark_settled_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let shared = SharedExpense::new("Cabin", Money::from_cents(30000), "A", ["B"], date);
        let id = shared.id;
        storage.shared.upsert(shared).unwrap();
        storage.mark_settled(id, date).unwrap();

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let pending = reopened
            .query_shared(&SharedQuery::pending(), SortOrder::Newest)
            .unwrap();
        assert!(pending.is_empty());
    }
}
