//! Shared expense service
//!
//! Splitting a bill between people, settling it, and reading the ledger of
//! who owes whom.

use chrono::NaiveDate;

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{parse_participants, Money, SharedExpense};
use crate::reports::LedgerSummary;
use crate::storage::{RecordSource, SharedQuery, SortOrder, Storage};

/// Service for shared expense management
pub struct SharedExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for recording a shared expense
#[derive(Debug, Clone)]
pub struct CreateSharedInput {
    pub title: String,
    pub total_amount: Money,
    pub paid_by: String,
    /// Comma-separated names of everyone sharing the cost besides the payer
    pub participants: String,
    pub date: NaiveDate,
}

impl<'a> SharedExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a shared expense, splitting the total evenly between the payer
    /// and the participants
    pub fn create(&self, input: CreateSharedInput) -> PocketbookResult<SharedExpense> {
        if input.total_amount.is_negative() {
            return Err(PocketbookError::InvalidArgument(format!(
                "Shared expense amount cannot be negative: {}",
                input.total_amount
            )));
        }

        let shared = SharedExpense::new(
            input.title.trim(),
            input.total_amount,
            input.paid_by,
            parse_participants(&input.participants),
            input.date,
        );

        shared
            .validate()
            .map_err(|e| PocketbookError::Validation(e.to_string()))?;

        self.storage.shared.upsert(shared.clone())?;
        self.storage.shared.save()?;

        tracing::info!(
            id = %shared.id,
            total = %shared.total_amount,
            paid_by = %shared.paid_by,
            shares = shared.share_count(),
            "recorded shared expense"
        );
        Ok(shared)
    }

    /// Resolve a full or abbreviated ID to exactly one record
    pub fn find(&self, identifier: &str) -> PocketbookResult<SharedExpense> {
        let mut matches = self.storage.shared.find(identifier)?;
        match matches.len() {
            0 => Err(PocketbookError::shared_expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(PocketbookError::Validation(format!(
                "'{}' matches {} shared expenses; use more of the ID",
                identifier, n
            ))),
        }
    }

    /// Mark a shared expense as settled on `date`
    pub fn settle(&self, identifier: &str, date: NaiveDate) -> PocketbookResult<SharedExpense> {
        let shared = self.find(identifier)?;
        let settled = self.storage.mark_settled(shared.id, date)?;
        tracing::info!(id = %settled.id, settled_at = %date, "settled shared expense");
        Ok(settled)
    }

    pub fn list(
        &self,
        query: &SharedQuery,
        order: SortOrder,
    ) -> PocketbookResult<Vec<SharedExpense>> {
        self.storage.query_shared(query, order)
    }

    /// Everyone who has paid for or shared an expense, sorted
    pub fn participants(&self) -> PocketbookResult<Vec<String>> {
        Ok(self.storage.distinct_participants()?.into_iter().collect())
    }

    /// Net balances over every unsettled shared expense
    pub fn balances(&self) -> PocketbookResult<LedgerSummary> {
        let pending = self
            .storage
            .query_shared(&SharedQuery::pending(), SortOrder::Oldest)?;
        Ok(LedgerSummary::from_records(&pending))
    }
}
