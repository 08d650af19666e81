//! # Date Ranges and Month Cursor
//!
//! Inclusive date ranges used by aggregation and export, and the month cursor
//! the calendar view steps through.

use crate::LabTrackError;
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// HELPERS
// =============================================================================

/// First day of a month.
pub fn first_day_of_month(year: i32, month: u32) -> Result<NaiveDate, LabTrackError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LabTrackError::InvalidDate(format!("{:04}-{:02}", year, month)))
}

/// Last day of a month.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, LabTrackError> {
    first_day_of_month(year, month)?
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| LabTrackError::InvalidDate(format!("{:04}-{:02}", year, month)))
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, LabTrackError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| LabTrackError::InvalidDate(input.to_string()))
}

// =============================================================================
// DATE RANGE
// =============================================================================

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range. Rejects `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LabTrackError> {
        if start > end {
            return Err(LabTrackError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole of one month.
    pub fn month(year: i32, month: u32) -> Result<Self, LabTrackError> {
        Self::new(
            first_day_of_month(year, month)?,
            last_day_of_month(year, month)?,
        )
    }

    /// The whole of one year.
    pub fn year(year: i32) -> Result<Self, LabTrackError> {
        Self::new(first_day_of_month(year, 1)?, last_day_of_month(year, 12)?)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True if `date` falls within the range (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True if the range is exactly one whole calendar month.
    #[must_use]
    pub fn is_single_month(&self) -> bool {
        Self::month(self.start.year(), self.start.month()).is_ok_and(|m| m == *self)
    }

    /// True if the range is exactly one whole calendar year.
    #[must_use]
    pub fn is_full_year(&self) -> bool {
        Self::year(self.start.year()).is_ok_and(|y| y == *self)
    }

    /// Every `(year, month)` the range touches, in chronological order.
    #[must_use]
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let mut cursor = MonthCursor::from_date(self.start);
        let last = MonthCursor::from_date(self.end);
        while cursor <= last {
            months.push((cursor.year(), cursor.month()));
            cursor = cursor.next();
        }
        months
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// =============================================================================
// MONTH CURSOR
// =============================================================================

/// The month currently shown by a calendar view.
///
/// Ordered chronologically; `month` is always 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Create a cursor. Rejects months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, LabTrackError> {
        first_day_of_month(year, month)?;
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The previous month, wrapping January back to December.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month, wrapping December forward to January.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The whole month as a date range.
    pub fn range(&self) -> Result<DateRange, LabTrackError> {
        DateRange::month(self.year, self.month)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthCursor {
    type Err = LabTrackError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LabTrackError::InvalidDate(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}
