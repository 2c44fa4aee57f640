//! Calendar month representation
//!
//! Expenses are rolled up by calendar month. `YearMonth` is the key used for
//! those rollups and for the "current period" seen by the dashboard.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PocketbookError, PocketbookResult};

/// Canonical English month names, indexed by `month - 1`
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display name for a month number (1-12)
///
/// # Examples
/// ```
/// use pocketbook::models::month_name;
/// assert_eq!(month_name(3).unwrap(), "March");
/// assert!(month_name(13).is_err());
/// ```
pub fn month_name(month: u32) -> PocketbookResult<&'static str> {
    validate_month(month)?;
    Ok(MONTH_NAMES[(month - 1) as usize])
}

/// Reject month numbers outside 1..=12
pub fn validate_month(month: u32) -> PocketbookResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(PocketbookError::invalid_month(month))
    }
}

/// A calendar month in a specific year (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a year/month pair, validating the month
    pub fn new(year: i32, month: u32) -> PocketbookResult<Self> {
        validate_month(month)?;
        Ok(Self { year, month })
    }

    /// The year/month containing a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Display name of this month ("January")
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Parse a "YYYY-MM" string
    pub fn parse(s: &str) -> PocketbookResult<Self> {
        let s = s.trim();
        let invalid = || {
            PocketbookError::InvalidArgument(format!(
                "Invalid month format: {}. Use YYYY-MM (e.g., 2025-01)",
                s
            ))
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(s: &str) -> PocketbookResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        PocketbookError::InvalidArgument(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}
