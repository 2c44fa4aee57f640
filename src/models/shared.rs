//! Shared expense model
//!
//! A shared expense is paid up front by one person and split equally between
//! that payer and every listed participant. The payer is never listed among
//! the participants: their share is the implicit extra one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SharedExpenseId;
use super::money::Money;

/// Settlement state of a shared expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Settlement {
    /// Still counted in everyone's balance
    #[default]
    Pending,
    /// Reconciled; no longer contributes to balances
    Settled { settled_at: NaiveDate },
}

impl Settlement {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }

    pub fn settled_at(&self) -> Option<NaiveDate> {
        match self {
            Self::Pending => None,
            Self::Settled { settled_at } => Some(*settled_at),
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Settled { settled_at } => write!(f, "Settled {}", settled_at.format("%Y-%m-%d")),
        }
    }
}

/// An expense paid by one person on behalf of a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedExpense {
    pub id: SharedExpenseId,

    pub title: String,

    /// Full cost of the shared item
    pub total_amount: Money,

    /// Who fronted the payment
    pub paid_by: String,

    /// Everyone else who owes a share; never contains `paid_by`
    pub participants: Vec<String>,

    /// `total_amount / (1 + participants.len())`, rounded to the cent
    pub per_person_amount: Money,

    /// Date of the expense
    pub date: NaiveDate,

    #[serde(default)]
    pub settlement: Settlement,

    pub created_at: DateTime<Utc>,
}

impl SharedExpense {
    /// Create a shared expense and compute each person's share.
    ///
    /// Participants are trimmed, blanks and the payer are dropped, and only
    /// the first occurrence of each name is kept.
    pub fn new<I, S>(
        title: impl Into<String>,
        total_amount: Money,
        paid_by: impl Into<String>,
        participants: I,
        date: NaiveDate,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paid_by = paid_by.into().trim().to_string();
        let participants = normalize_participants(&paid_by, participants);
        let shares = 1 + participants.len() as i64;
        let per_person_amount = total_amount.div_round(shares).unwrap_or(total_amount);

        Self {
            id: SharedExpenseId::new(),
            title: title.into(),
            total_amount,
            paid_by,
            participants,
            per_person_amount,
            date,
            settlement: Settlement::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settlement.is_settled()
    }

    /// Number of equal shares, the payer included
    pub fn share_count(&self) -> usize {
        1 + self.participants.len()
    }

    /// Whether `person` paid for or takes part in this expense
    pub fn involves(&self, person: &str) -> bool {
        self.paid_by == person || self.participants.iter().any(|p| p == person)
    }

    /// Difference between the total and the sum of the rounded shares
    pub fn rounding_drift(&self) -> Money {
        self.total_amount - self.per_person_amount.times(self.share_count() as i64)
    }

    /// Mark the expense as settled on `settled_at`
    pub fn settle(&mut self, settled_at: NaiveDate) -> Result<(), SharedExpenseValidationError> {
        if let Settlement::Settled { settled_at: previous } = self.settlement {
            return Err(SharedExpenseValidationError::AlreadySettled(previous));
        }
        self.settlement = Settlement::Settled { settled_at };
        Ok(())
    }

    /// Validate the shared expense
    pub fn validate(&self) -> Result<(), SharedExpenseValidationError> {
        if self.paid_by.is_empty() {
            return Err(SharedExpenseValidationError::MissingPayer);
        }

        if self.total_amount.is_negative() {
            return Err(SharedExpenseValidationError::NegativeAmount(self.total_amount));
        }

        if !self.total_amount.is_within_limit() {
            return Err(SharedExpenseValidationError::AmountTooLarge(self.total_amount));
        }

        if self.participants.iter().any(|p| *p == self.paid_by) {
            return Err(SharedExpenseValidationError::PayerListedAsParticipant(
                self.paid_by.clone(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for SharedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} paid by {}, {} each)",
            self.title, self.total_amount, self.paid_by, self.per_person_amount
        )
    }
}

/// Split a comma-separated participant list ("bob, carol,,dave")
pub fn parse_participants(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_participants<I, S>(paid_by: &str, participants: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    for participant in participants {
        let participant = participant.as_ref().trim();
        if participant.is_empty() || participant == paid_by {
            continue;
        }
        if !seen.iter().any(|p| p == participant) {
            seen.push(participant.to_string());
        }
    }
    seen
}

/// Validation errors for shared expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedExpenseValidationError {
    MissingPayer,
    NegativeAmount(Money),
    AmountTooLarge(Money),
    PayerListedAsParticipant(String),
    AlreadySettled(NaiveDate),
}

impl fmt::Display for SharedExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPayer => write!(f, "A shared expense needs a payer"),
            Self::NegativeAmount(amount) => {
                write!(f, "Shared expense total cannot be negative: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Shared expense total {} exceeds the maximum of {}", amount, Money::MAX)
            }
            Self::PayerListedAsParticipant(name) => {
                write!(f, "Payer '{}' cannot also be a participant", name)
            }
            Self::AlreadySettled(date) => write!(f, "Already settled on {}", date),
        }
    }
}

impl std::error::Error for SharedExpenseValidationError {}
