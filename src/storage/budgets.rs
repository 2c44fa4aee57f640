//! Budget repository for JSON storage
//!
//! Budgets are keyed by category; order of first insertion is preserved so
//! alerts come out in a stable order.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PocketbookError;
use crate::models::{Budget, Money};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<Vec<Budget>>,
}

fn lock_error(e: impl std::fmt::Display) -> PocketbookError {
    PocketbookError::Storage(format!("Failed to acquire budget lock: {}", e))
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), PocketbookError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        *budgets = file_data.budgets;
        tracing::debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    pub fn save(&self) -> Result<(), PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        let file_data = BudgetData {
            budgets: budgets.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All budgets in insertion order
    pub fn get_all(&self) -> Result<Vec<Budget>, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.clone())
    }

    pub fn get_by_category(&self, category: &str) -> Result<Option<Budget>, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.iter().find(|b| b.category == category).cloned())
    }

    /// Set the limit for a category, creating the budget if needed
    pub fn set_limit(&self, category: &str, limit: Money) -> Result<Budget, PocketbookError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        let budget = match budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => {
                existing.set_limit(limit);
                existing.clone()
            }
            None => {
                let budget = Budget::new(category, limit);
                budgets.push(budget.clone());
                budget
            }
        };
        Ok(budget)
    }

    /// Remove a category's budget, returning it if one existed
    pub fn remove(&self, category: &str) -> Result<Option<Budget>, PocketbookError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        let position = budgets.iter().position(|b| b.category == category);
        Ok(position.map(|i| budgets.remove(i)))
    }

    pub fn count(&self) -> Result<usize, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.len())
    }
}
