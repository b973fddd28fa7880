//! Calendar-month reference used for month-scoped queries.
//!
//! Month boundaries are half-open: a date belongs to a month iff
//! `first_day <= date < first_of_next_month`. Every month-filtered store
//! query and every recurrence predicate uses this same boundary pair.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A (year, month) pair, stored normalized to the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthRef(NaiveDate);

impl MonthRef {
    /// Creates a month reference, returning `None` for an invalid month
    /// number or an out-of-range year.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Returns the month containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 is valid in every month, so this never actually falls back.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The month number (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The first day of this month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// The first day of the following month.
    #[must_use]
    pub fn first_of_next_month(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the date falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.first_of_next_month()
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
