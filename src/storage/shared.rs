//! Shared expense repository for JSON storage

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::PocketbookError;
use crate::models::{SharedExpense, SharedExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::query::{SharedQuery, SortOrder};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SharedData {
    shared_expenses: Vec<SharedExpense>,
}

/// Repository for shared expense persistence
pub struct SharedExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<SharedExpense>>,
}

fn lock_error(e: impl std::fmt::Display) -> PocketbookError {
    PocketbookError::Storage(format!("Failed to acquire shared expense lock: {}", e))
}

impl SharedExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), PocketbookError> {
        let file_data: SharedData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        for shared in &file_data.shared_expenses {
            if let Err(e) = shared.validate() {
                tracing::warn!(id = %shared.id, error = %e, "stored shared expense fails validation");
            }
        }

        *data = file_data.shared_expenses;
        tracing::debug!(count = data.len(), "loaded shared expenses");
        Ok(())
    }

    pub fn save(&self) -> Result<(), PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = SharedData {
            shared_expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: SharedExpenseId) -> Result<Option<SharedExpense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|s| s.id == id).cloned())
    }

    /// Find shared expenses whose ID matches a user-supplied identifier
    pub fn find(&self, identifier: &str) -> Result<Vec<SharedExpense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .iter()
            .filter(|s| s.id.matches(identifier))
            .cloned()
            .collect())
    }

    pub fn get_all(&self) -> Result<Vec<SharedExpense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.clone())
    }

    /// Matching records ordered by creation time
    pub fn query(
        &self,
        query: &SharedQuery,
        order: SortOrder,
    ) -> Result<Vec<SharedExpense>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut matching: Vec<_> = data.iter().filter(|s| query.matches(s)).cloned().collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        if order == SortOrder::Newest {
            matching.reverse();
        }
        Ok(matching)
    }

    pub fn upsert(&self, shared: SharedExpense) -> Result<(), PocketbookError> {
        let mut data = self.data.write().map_err(lock_error)?;
        match data.iter_mut().find(|s| s.id == shared.id) {
            Some(existing) => *existing = shared,
            None => data.push(shared),
        }
        Ok(())
    }

    /// Flip a record to settled. Returns the updated record.
    pub fn mark_settled(
        &self,
        id: SharedExpenseId,
        settled_at: NaiveDate,
    ) -> Result<SharedExpense, PocketbookError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let shared = data
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PocketbookError::shared_expense_not_found(id.to_string()))?;

        shared
            .settle(settled_at)
            .map_err(|e| PocketbookError::Validation(e.to_string()))?;
        Ok(shared.clone())
    }

    /// Everyone who paid for or takes part in any shared expense
    pub fn distinct_participants(&self) -> Result<BTreeSet<String>, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .iter()
            .flat_map(|s| std::iter::once(&s.paid_by).chain(s.participants.iter()))
            .cloned()
            .collect())
    }

    pub fn count(&self) -> Result<usize, PocketbookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SharedExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SharedExpenseRepository::new(temp_dir.path().join("shared.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_mark_settled() {
        let (_temp_dir, repo) = create_test_repo();
        let shared = SharedExpense::new("Dinner", Money::from_cents(9000), "A", ["B", "C"], date(1));
        let id = shared.id;
        repo.upsert(shared).unwrap();

        let settled = repo.mark_settled(id, date(3)).unwrap();
        assert_eq!(settled.settlement.settled_at(), Some(date(3)));
        assert!(repo.get(id).unwrap().unwrap().is_settled());

        let err = repo.mark_settled(id, date(4)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_mark_settled_unknown_id() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.mark_settled(SharedExpenseId::new(), date(1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_query_and_participants() {
        let (_temp_dir, repo) = create_test_repo();
        let dinner = SharedExpense::new("Dinner", Money::from_cents(9000), "A", ["B", "C"], date(1));
        let taxi = SharedExpense::new("Taxi", Money::from_cents(3000), "D", ["A"], date(2));
        let dinner_id = dinner.id;
        repo.upsert(dinner).unwrap();
        repo.upsert(taxi).unwrap();
        repo.mark_settled(dinner_id, date(5)).unwrap();

        let pending = repo.query(&SharedQuery::pending(), SortOrder::Newest).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Taxi");

        let involving_a = repo
            .query(&SharedQuery::new().participant("A"), SortOrder::Oldest)
            .unwrap();
        assert_eq!(involving_a.len(), 2);

        let people: Vec<_> = repo.distinct_participants().unwrap().into_iter().collect();
        assert_eq!(people, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let shared = SharedExpense::new("Rent", Money::from_cents(120000), "A", ["B"], date(1));
        let id = shared.id;
        repo.upsert(shared).unwrap();
        repo.mark_settled(id, date(2)).unwrap();
        repo.save().unwrap();

        let reloaded = SharedExpenseRepository::new(temp_dir.path().join("shared.json"));
        reloaded.load().unwrap();
        let loaded = reloaded.get(id).unwrap().unwrap();
        assert_eq!(loaded.per_person_amount.cents(), 60000);
        assert!(loaded.is_settled());
    }
}
