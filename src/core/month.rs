//! Reporting month - the year+month every aggregate view is filtered by.
//!
//! A reporting month is transient session state and is never persisted. It is
//! stored as the first day of the month so every derived bound is infallible.

use crate::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate, Utc};
use std::fmt;

/// A calendar year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportingMonth {
    first_day: NaiveDate,
}

impl ReportingMonth {
    /// Builds a reporting month, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(Error::InvalidMonth { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let first_day = date.with_day(1).unwrap_or(date);
        Self { first_day }
    }

    /// The month containing today's UTC date.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Month number, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Inclusive lower bound of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Exclusive upper bound: the first day of the following month.
    ///
    /// December rolls over to January 1 of the next year.
    #[must_use]
    pub fn next_first_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Last calendar day of the month.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.next_first_day().pred_opt().unwrap_or(self.first_day)
    }

    /// Half-open range `[first_day, next_first_day)` used for scoped deletes.
    #[must_use]
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day, self.next_first_day())
    }

    /// Month filter: true iff `date` has this month's year and month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month; December rolls over to January.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            first_day: self.next_first_day(),
        }
    }

    /// The preceding month; January rolls back to December.
    #[must_use]
    pub fn previous(&self) -> Self {
        let first_day = self
            .first_day
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.first_day);
        Self { first_day }
    }

    /// Every day of the month in order, for per-day meal grids.
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day
            .iter_days()
            .take_while(|day| self.contains(*day))
            .collect()
    }

    /// Dates a deposit made on `today` for this month.
    ///
    /// The day number is kept while year and month come from the reporting
    /// month. Days past the end of a shorter month clamp to its last day.
    #[must_use]
    pub fn pin_day(&self, today: NaiveDate) -> NaiveDate {
        self.first_day
            .with_day(today.day())
            .unwrap_or_else(|| self.last_day())
    }
}

impl Default for ReportingMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%B %Y"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(matches!(
            ReportingMonth::new(2024, 13),
            Err(Error::InvalidMonth {
                year: 2024,
                month: 13
            })
        ));
        assert!(ReportingMonth::new(2024, 0).is_err());
    }

    #[test]
    fn test_contains_excludes_neighbouring_days() {
        let march = ReportingMonth::new(2024, 3).unwrap();
        assert!(!march.contains(date(2024, 2, 29)));
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));
        // Same month number, different year
        assert!(!march.contains(date(2023, 3, 15)));
    }

    #[test]
    fn test_date_range_december_rolls_over() {
        let december = ReportingMonth::new(2024, 12).unwrap();
        assert_eq!(
            december.date_range(),
            (date(2024, 12, 1), date(2025, 1, 1))
        );
        assert_eq!(december.last_day(), date(2024, 12, 31));
        assert_eq!(december.next(), ReportingMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_previous_from_january() {
        let january = ReportingMonth::new(2025, 1).unwrap();
        assert_eq!(january.previous(), ReportingMonth::new(2024, 12).unwrap());
    }

    #[test]
    fn test_containing_normalises_to_first_day() {
        let month = ReportingMonth::containing(date(2024, 7, 19));
        assert_eq!(month.first_day(), date(2024, 7, 1));
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 7);
    }

    #[test]
    fn test_days_in_leap_february() {
        let february = ReportingMonth::new(2024, 2).unwrap();
        let days = february.days();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&date(2024, 2, 1)));
        assert_eq!(days.last(), Some(&date(2024, 2, 29)));
    }

    #[test]
    fn test_pin_day_keeps_day_number() {
        let march = ReportingMonth::new(2024, 3).unwrap();
        assert_eq!(march.pin_day(date(2024, 5, 17)), date(2024, 3, 17));
    }

    #[test]
    fn test_pin_day_clamps_to_month_end() {
        let february = ReportingMonth::new(2023, 2).unwrap();
        assert_eq!(february.pin_day(date(2023, 3, 31)), date(2023, 2, 28));
    }

    #[test]
    fn test_display() {
        let month = ReportingMonth::new(2024, 3).unwrap();
        assert_eq!(month.to_string(), "March 2024");
    }
}
