//! Budget service
//!
//! Monthly category limits and the alerts raised when spending passes them.

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Budget, Money, YearMonth};
use crate::reports::{AggregationEngine, BudgetAlert};
use crate::storage::{RecordSource, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the monthly limit for a category, replacing any previous limit
    pub fn set_limit(&self, category: &str, limit: Money) -> PocketbookResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(PocketbookError::Validation(
                "Budget category cannot be empty".into(),
            ));
        }
        if limit.is_negative() {
            return Err(PocketbookError::InvalidArgument(format!(
                "Budget limit cannot be negative: {}",
                limit
            )));
        }
        if !limit.is_within_limit() {
            return Err(PocketbookError::InvalidArgument(format!(
                "Budget limit {} exceeds the maximum of {}",
                limit,
                Money::MAX
            )));
        }

        let budget = self.storage.budgets.set_limit(category, limit)?;
        self.storage.budgets.save()?;

        tracing::info!(category, limit = %limit, "set budget");
        Ok(budget)
    }

    /// Remove a category's budget
    pub fn remove(&self, category: &str) -> PocketbookResult<Budget> {
        let category = category.trim();
        let removed = self
            .storage
            .budgets
            .remove(category)?
            .ok_or_else(|| PocketbookError::budget_not_found(category))?;
        self.storage.budgets.save()?;

        tracing::info!(category, "removed budget");
        Ok(removed)
    }

    /// All budgets in the order they were first set
    pub fn list(&self) -> PocketbookResult<Vec<Budget>> {
        self.storage.query_budgets()
    }

    /// Budgets overspent in `period`
    pub fn alerts(&self, period: YearMonth) -> PocketbookResult<Vec<BudgetAlert>> {
        let expenses = self.storage.all_expenses()?;
        let budgets = self.storage.query_budgets()?;
        AggregationEngine::new(&expenses, period).budget_alerts(&budgets, period.month, period.year)
    }
}
