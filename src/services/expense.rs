//! Expense service
//!
//! Recording, listing and soft-deleting personal expenses.

use chrono::NaiveDate;

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::{ExpenseQuery, RecordSource, SortOrder, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub payment_mode: Option<String>,
}

impl CreateExpenseInput {
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            description: None,
            payment_mode: None,
        }
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new personal expense
    pub fn create(&self, input: CreateExpenseInput) -> PocketbookResult<Expense> {
        if input.amount.is_negative() {
            return Err(PocketbookError::InvalidArgument(format!(
                "Expense amount cannot be negative: {}",
                input.amount
            )));
        }

        let expense = Expense::with_details(
            input.amount,
            input.category.trim(),
            input.date,
            input.description.unwrap_or_default().trim(),
            input.payment_mode.unwrap_or_default().trim(),
        );

        expense
            .validate()
            .map_err(|e| PocketbookError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(
            id = %expense.id,
            amount = %expense.amount,
            category = %expense.category,
            date = %expense.date,
            "recorded expense"
        );
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> PocketbookResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Resolve a full or abbreviated expense ID to exactly one record
    pub fn find(&self, identifier: &str) -> PocketbookResult<Expense> {
        let mut matches = self.storage.expenses.find(identifier)?;
        match matches.len() {
            0 => Err(PocketbookError::expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(PocketbookError::Validation(format!(
                "'{}' matches {} expenses; use more of the ID",
                identifier, n
            ))),
        }
    }

    /// Soft-delete an expense; the record stays on disk but stops counting
    pub fn delete(&self, identifier: &str) -> PocketbookResult<Expense> {
        let mut expense = self.find(identifier)?;
        if expense.is_deleted() {
            return Err(PocketbookError::Validation(format!(
                "Expense {} is already deleted",
                expense.id
            )));
        }

        expense.mark_deleted();
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "deleted expense");
        Ok(expense)
    }

    pub fn list(&self, query: &ExpenseQuery, order: SortOrder) -> PocketbookResult<Vec<Expense>> {
        self.storage.query_expenses(query, order)
    }

    /// Every category ever used, sorted
    pub fn categories(&self) -> PocketbookResult<Vec<String>> {
        Ok(self.storage.distinct_categories()?.into_iter().collect())
    }

    /// Every year with a record, ascending
    pub fn years(&self) -> PocketbookResult<Vec<i32>> {
        Ok(self.storage.distinct_years()?.into_iter().collect())
    }
}
