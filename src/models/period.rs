//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type identifying the calendar
//! month a payroll run is generated for.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Identifies the calendar month a payroll run covers.
///
/// A pay period is a `(year, month)` pair. Payroll records are keyed by
/// `(employee_id, PayPeriod)`, so the type is hashable and ordered.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2026, 2).unwrap();
/// assert_eq!(period.days_in_month(), 28);
/// assert_eq!(period.to_string(), "2026-02");
///
/// assert!(PayPeriod::new(2026, 13).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl PayPeriod {
    /// Creates a pay period, validating that `month` is in `1..=12` and the
    /// year is plausible for a payroll system.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation {
                message: format!("month must be between 1 and 12, got {month}"),
            });
        }
        if !(1900..=9999).contains(&year) {
            return Err(EngineError::Validation {
                message: format!("year {year} is out of range"),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the number of calendar days in the period's month.
    ///
    /// Used as the default scheduled-working-day count when the attendance
    /// policy does not configure a fixed count.
    pub fn days_in_month(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match (first, next) {
            (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
            _ => 30,
        }
    }

    /// Checks if a given date falls within this period's month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
