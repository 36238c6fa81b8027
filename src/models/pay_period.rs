//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, the inclusive date range a
//! payroll record covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the date range covered by a payroll record.
///
/// Both ends are inclusive, so two periods that share a single day overlap.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let january = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// ).unwrap();
///
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting a start date after the end date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = PayPeriod {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the start date is not after the end date.
    ///
    /// Periods built directly or deserialized skip [`PayPeriod::new`], so
    /// workflows call this before persisting.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::validation(
                "period",
                format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            ));
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let february = PayPeriod {
    ///     start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
    /// };
    ///
    /// assert!(february.contains_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    /// assert!(february.contains_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    /// assert!(!february.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the two closed ranges share at least one day.
    ///
    /// Two valid ranges overlap exactly when one starts inside the other.
    pub fn overlaps(&self, other: &PayPeriod) -> bool {
        self.contains_date(other.start_date) || other.contains_date(self.start_date)
    }

    /// Returns true if this period lies entirely within `[from, to]`.
    pub fn within(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date >= from && self.end_date <= to
    }
}
