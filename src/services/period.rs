//! Calendar period service
//!
//! Supplies "today" and the current month through an injectable [`Clock`],
//! and parses the month references accepted on the command line.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{YearMonth, MONTH_NAMES};

/// Source of the current date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Fixed on the first day of `year`-`month`
    pub fn at(year: i32, month: u32) -> PocketbookResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| PocketbookError::invalid_month(month))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Service for calendar period lookups
pub struct PeriodService<'a> {
    clock: &'a dyn Clock,
}

impl<'a> PeriodService<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The (year, month) observed right now
    pub fn current_period(&self) -> YearMonth {
        YearMonth::from_date(self.clock.today())
    }

    /// Parse a month reference, or fall back to the current month
    pub fn parse_or_current(&self, month: Option<&str>) -> PocketbookResult<YearMonth> {
        match month {
            Some(s) => self.parse(s),
            None => Ok(self.current_period()),
        }
    }

    /// Parse a month reference
    ///
    /// Formats supported: "2025-01", "January 2025", "jan", "current", "last".
    /// A bare month name means its most recent occurrence.
    pub fn parse(&self, s: &str) -> PocketbookResult<YearMonth> {
        let lower = s.trim().to_lowercase();
        let current = self.current_period();

        match lower.as_str() {
            "current" | "now" | "this" => return Ok(current),
            "last" | "previous" | "prev" => {
                return Ok(if current.month == 1 {
                    YearMonth {
                        year: current.year - 1,
                        month: 12,
                    }
                } else {
                    YearMonth {
                        year: current.year,
                        month: current.month - 1,
                    }
                })
            }
            _ => {}
        }

        if let Some(period) = self.parse_month_name(&lower, current)? {
            return Ok(period);
        }

        YearMonth::parse(&lower)
    }

    fn parse_month_name(&self, s: &str, current: YearMonth) -> PocketbookResult<Option<YearMonth>> {
        let (name, rest) = match s.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (s, ""),
        };
        if name.len() < 3 {
            return Ok(None);
        }

        let Some(index) = MONTH_NAMES
            .iter()
            .position(|m| m.to_lowercase().starts_with(name))
        else {
            return Ok(None);
        };
        let month = index as u32 + 1;

        let year = if rest.is_empty() {
            if month > current.month {
                current.year - 1
            } else {
                current.year
            }
        } else {
            rest.parse().map_err(|_| {
                PocketbookError::InvalidArgument(format!("Invalid year in '{}'", s))
            })?
        };

        YearMonth::new(year, month).map(Some)
    }
}
