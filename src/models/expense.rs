//! Personal expense model
//!
//! An expense is immutable once recorded except for its status tag: deleting
//! an expense flips it to `Deleted` and the record is kept.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use super::period::YearMonth;

/// Lifecycle tag of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    /// Soft-deleted: retained in storage, ignored by aggregation
    Deleted,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Deleted => write!(f, "Deleted"),
        }
    }
}

/// A single expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (never negative)
    pub amount: Money,

    /// Free-form category label, grouped by exact match
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// How it was paid ("cash", "card", ...)
    #[serde(default)]
    pub payment_mode: String,

    /// Date of the expense
    pub date: NaiveDate,

    /// Month of `date` (1-12), stored for cheap filtering
    pub month: u32,

    /// Year of `date`, stored for cheap filtering
    pub year: i32,

    /// Part of a shared expense rather than personal spending
    #[serde(default)]
    pub is_shared: bool,

    #[serde(default)]
    pub status: RecordStatus,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new personal expense
    pub fn new(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category: category.into(),
            description: String::new(),
            payment_mode: String::new(),
            date,
            month: date.month(),
            year: date.year(),
            is_shared: false,
            status: RecordStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Create an expense with description and payment mode
    pub fn with_details(
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        payment_mode: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(amount, category, date);
        expense.description = description.into();
        expense.payment_mode = payment_mode.into();
        expense
    }

    pub fn is_deleted(&self) -> bool {
        self.status == RecordStatus::Deleted
    }

    /// Whether this record takes part in personal spending analytics
    pub fn is_countable(&self) -> bool {
        !self.is_deleted() && !self.is_shared
    }

    /// The calendar month this expense falls in
    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Soft-delete this expense
    pub fn mark_deleted(&mut self) {
        self.status = RecordStatus::Deleted;
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if self.month != self.date.month() || self.year != self.date.year() {
            return Err(ExpenseValidationError::PeriodMismatch {
                date: self.date,
                month: self.month,
                year: self.year,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date.format("%Y-%m-%d"), self.category, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    PeriodMismatch { date: NaiveDate, month: u32, year: i32 },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Expense amount {} exceeds the maximum of {}", amount, Money::MAX)
            }
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::PeriodMismatch { date, month, year } => write!(
                f,
                "Stored period {:04}-{:02} does not match date {}",
                year, month, date
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
