//! Query predicates and sort orders accepted by the record source

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PocketbookError;
use crate::models::{Expense, SharedExpense};

/// Listing order by date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = PocketbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "desc" => Ok(Self::Newest),
            "oldest" | "asc" => Ok(Self::Oldest),
            other => Err(PocketbookError::InvalidArgument(format!(
                "Unknown sort order '{}'. Use 'newest' or 'oldest'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
        }
    }
}

/// Filter for expense queries
///
/// Unset fields match everything. Shared and deleted records are excluded
/// unless explicitly included.
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub include_shared: bool,
    pub include_deleted: bool,
}

impl ExpenseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Match every record regardless of shared/deleted flags
    pub fn everything(mut self) -> Self {
        self.include_shared = true;
        self.include_deleted = true;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        (self.include_shared || !expense.is_shared)
            && (self.include_deleted || !expense.is_deleted())
            && self.month.map_or(true, |m| expense.month == m)
            && self.year.map_or(true, |y| expense.year == y)
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category == c)
            && self.date.map_or(true, |d| expense.date == d)
    }
}

/// Settlement status filter for shared expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementFilter {
    Pending,
    Settled,
}

impl FromStr for SettlementFilter {
    type Err = PocketbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "unsettled" => Ok(Self::Pending),
            "settled" => Ok(Self::Settled),
            other => Err(PocketbookError::InvalidArgument(format!(
                "Unknown status '{}'. Use 'pending' or 'settled'",
                other
            ))),
        }
    }
}

/// Filter for shared-expense queries
#[derive(Debug, Clone, Default)]
pub struct SharedQuery {
    pub status: Option<SettlementFilter>,
    /// Matches the payer or any participant
    pub participant: Option<String>,
}

impl SharedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            status: Some(SettlementFilter::Pending),
            participant: None,
        }
    }

    pub fn status(mut self, status: SettlementFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    pub fn matches(&self, shared: &SharedExpense) -> bool {
        let status_ok = match self.status {
            None => true,
            Some(SettlementFilter::Pending) => !shared.is_settled(),
            Some(SettlementFilter::Settled) => shared.is_settled(),
        };
        status_ok
            && self
                .participant
                .as_deref()
                .map_or(true, |p| shared.involves(p))
    }
}
