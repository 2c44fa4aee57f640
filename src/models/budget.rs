//! Monthly budget model
//!
//! A budget caps spending for one category per calendar month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// A monthly spending limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Category label, matched exactly against expense categories
    pub category: String,

    /// Spending above this amount in a month raises an alert
    pub monthly_limit: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(category: impl Into<String>, monthly_limit: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category: category.into(),
            monthly_limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the monthly limit
    pub fn set_limit(&mut self, monthly_limit: Money) {
        self.monthly_limit = monthly_limit;
        self.updated_at = Utc::now();
    }

    /// Whether `spent` exceeds the limit (strictly greater)
    pub fn is_exceeded_by(&self, spent: Money) -> bool {
        spent > self.monthly_limit
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if self.monthly_limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }

        if !self.monthly_limit.is_within_limit() {
            return Err(BudgetValidationError::LimitTooLarge);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / month", self.category, self.monthly_limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NegativeLimit,
    LimitTooLarge,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NegativeLimit => write!(f, "Monthly limit cannot be negative"),
            Self::LimitTooLarge => write!(f, "Monthly limit exceeds the maximum of {}", Money::MAX),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
