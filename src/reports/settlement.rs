//! Settlement ledger
//!
//! Net balances across unsettled shared expenses. The payer of a record is
//! credited the full amount and each participant owes one share, so a
//! positive balance means the person is owed money.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Money, SharedExpense};

/// Balances a single shared expense adds to the ledger
///
/// Computed regardless of settlement state; [`net_balances`] only applies it
/// for pending records.
pub fn record_contribution(record: &SharedExpense) -> BTreeMap<String, Money> {
    let mut balances = BTreeMap::new();
    apply(&mut balances, record);
    balances
}

/// Net balance per person over every pending record
///
/// Everyone named on a pending record appears in the result, even when their
/// balance nets to zero.
pub fn net_balances<'a, I>(records: I) -> BTreeMap<String, Money>
where
    I: IntoIterator<Item = &'a SharedExpense>,
{
    let mut balances = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        if record.is_settled() {
            skipped += 1;
            continue;
        }
        apply(&mut balances, record);
    }

    tracing::debug!(people = balances.len(), skipped, "net balances");
    balances
}

fn apply(balances: &mut BTreeMap<String, Money>, record: &SharedExpense) {
    *balances.entry(record.paid_by.clone()).or_default() += record.total_amount;
    for participant in &record.participants {
        *balances.entry(participant.clone()).or_default() -= record.per_person_amount;
    }
}

/// One person's position in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub person: String,
    pub amount: Money,
}

/// Net balances with helpers for who is owed and who owes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    balances: BTreeMap<String, Money>,
}

impl LedgerSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SharedExpense>,
    {
        Self {
            balances: net_balances(records),
        }
    }

    pub fn balances(&self) -> &BTreeMap<String, Money> {
        &self.balances
    }

    pub fn get(&self, person: &str) -> Option<Money> {
        self.balances.get(person).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// People owed money, largest balance first
    pub fn creditors(&self) -> Vec<Balance> {
        let mut owed = self.collect(Money::is_positive);
        owed.sort_by(|a, b| b.amount.cmp(&a.amount));
        owed
    }

    /// People who owe money, largest debt first
    pub fn debtors(&self) -> Vec<Balance> {
        let mut owing = self.collect(Money::is_negative);
        owing.sort_by(|a, b| a.amount.cmp(&b.amount));
        owing
    }

    /// Algebraic sum of all balances
    ///
    /// Not zero in general: the payer's own share and per-person rounding
    /// both stay in the payer's credit.
    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    fn collect(&self, keep: impl Fn(&Money) -> bool) -> Vec<Balance> {
        self.balances
            .iter()
            .filter(|(_, amount)| keep(*amount))
            .map(|(person, amount)| Balance {
                person: person.clone(),
                amount: *amount,
            })
            .collect()
    }
}
