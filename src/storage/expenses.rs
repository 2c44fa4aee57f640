//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. Records keep their
//! insertion order on disk.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PocketbookError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::query::{ExpenseQuery, SortOrder};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

fn lock_error(e: impl std::fmt::Display) -> PocketbookError {
    PocketbookError::Storage(format!("Failed to acquire expense lock: {}", e))
}

/// Sort by date, breaking ties on creation time
pub(super) fn sort_expenses(expenses: &mut [Expense], order: SortOrder) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
    if order == SortOrder::Newest {
        expenses.reverse();
    }
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), PocketbookError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        for expense in &file_data.expenses {
            if let Err(e) = expense.validate() {
                tracing::warn!(id = %expense.id, error = %e, "stored expense fails validation");
            }
        }

        *data = file_data.expenses;
        tracing::debug!(count = data.len(), "loaded expenses");
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = ExpenseData {
            expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    /// Find expenses whose ID matches a user-supplied identifier
    pub fn find(&self, identifier: &str) -> Result<Vec<Expense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .iter()
            .filter(|e| e.id.matches(identifier))
            .cloned()
            .collect())
    }

    /// Every stored expense in insertion order, deleted and shared included
    pub fn get_all(&self) -> Result<Vec<Expense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.clone())
    }

    pub fn query(
        &self,
        query: &ExpenseQuery,
        order: SortOrder,
    ) -> Result<Vec<Expense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut matching: Vec<_> = data.iter().filter(|e| query.matches(e)).cloned().collect();
        sort_expenses(&mut matching, order);
        Ok(matching)
    }

    /// Insert a new expense or replace the stored one with the same ID
    pub fn upsert(&self, expense: Expense) -> Result<(), PocketbookError> {
        let mut data = self.data.write().map_err(lock_error)?;
        match data.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => data.push(expense),
        }
        Ok(())
    }

    /// Distinct years over all records
    pub fn distinct_years(&self) -> Result<BTreeSet<i32>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().map(|e| e.year).collect())
    }

    /// Distinct categories over all records
    pub fn distinct_categories(&self) -> Result<BTreeSet<String>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().map(|e| e.category.clone()).collect())
    }

    pub fn count(&self) -> Result<usize, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
