//! Record identifiers
//!
//! Each record kind gets its own UUID newtype, shown to users as a short
//! prefixed form (`exp-1a2b3c4d`) that lookups accept back.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Shortest bare UUID prefix accepted by [`ExpenseId::matches`] and friends
const MIN_PREFIX_LEN: usize = 4;

macro_rules! record_id {
    ($name:ident, $tag:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse a full UUID, with or without the display tag
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let s = s.trim();
                Uuid::parse_str(s.strip_prefix($tag).unwrap_or(s)).map(Self)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether a user-typed identifier points at this record.
            ///
            /// Accepts the full UUID, the short display form, or a bare UUID
            /// prefix, case-insensitively.
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim().to_lowercase();
                let bare = identifier.strip_prefix($tag).unwrap_or(&identifier);
                bare.len() >= MIN_PREFIX_LEN && self.0.to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let full = self.0.simple().to_string();
                write!(f, "{}{}", $tag, &full[..8])
            }
        }
    };
}

record_id!(ExpenseId, "exp-");
record_id!(SharedExpenseId, "shr-");
record_id!(BudgetId, "bud-");

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_short_display() {
        let id = ExpenseId::parse(SAMPLE).unwrap();
        assert_eq!(id.to_string(), "exp-550e8400");
        assert!(SharedExpenseId::new().to_string().starts_with("shr-"));
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = SharedExpenseId::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));
        assert_eq!(serde_json::from_str::<SharedExpenseId>(&json).unwrap(), id);
    }

    #[test]
    fn test_parse_accepts_tagged_uuid() {
        let plain = ExpenseId::parse(SAMPLE).unwrap();
        let tagged = ExpenseId::parse(&format!("exp-{}", SAMPLE)).unwrap();
        assert_eq!(plain, tagged);
        assert_eq!(plain.as_uuid().to_string(), SAMPLE);
    }

    #[test]
    fn test_matches_short_forms() {
        let id = ExpenseId::parse(SAMPLE).unwrap();
        assert!(id.matches(SAMPLE));
        assert!(id.matches("exp-550e8400"));
        assert!(id.matches(" 550E "));
        assert!(!id.matches("550"));
        assert!(!id.matches("exp-deadbeef"));
    }

    #[test]
    fn test_short_display_is_not_a_full_id() {
        let id = BudgetId::new();
        assert!(BudgetId::parse(&id.to_string()).is_err());
        assert!(id.matches(&id.to_string()));
    }
}
