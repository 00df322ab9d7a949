// ABOUTME: Enrollment record, its lifecycle status, and the enrollment period arithmetic
// ABOUTME: Periods start at the end of the chosen day and run for the plan's length in months
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A student's subscription to a plan over a bounded date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Database identity
    pub id: i64,
    /// Enrolled student
    pub student_id: i64,
    /// Chosen plan
    pub plan_id: i64,
    /// Last instant of the first day
    pub start_date: DateTime<Utc>,
    /// `start_date` plus the plan length in months
    pub end_date: DateTime<Utc>,
    /// Plan monthly price times plan length, fixed at enrollment time
    pub price: f64,
    /// Soft-cancellation marker
    pub canceled_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of an enrollment. `Canceled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Counts toward overlap checks
    Active,
    /// Retained for history only
    Canceled,
}

impl Enrollment {
    /// Current lifecycle state
    #[must_use]
    pub const fn status(&self) -> EnrollmentStatus {
        if self.canceled_at.is_some() {
            EnrollmentStatus::Canceled
        } else {
            EnrollmentStatus::Active
        }
    }

    /// The stored date range
    #[must_use]
    pub const fn period(&self) -> EnrollmentPeriod {
        EnrollmentPeriod {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Earliest year a period may touch
const MIN_PERIOD_YEAR: i32 = 0;
/// Latest year a period may touch
const MAX_PERIOD_YEAR: i32 = 9999;

/// Date range covered by an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentPeriod {
    /// First instant covered
    pub start: DateTime<Utc>,
    /// Last instant covered
    pub end: DateTime<Utc>,
}

impl EnrollmentPeriod {
    /// Compute the period for a plan of `length_months` chosen to start on `start_date`
    ///
    /// The start is normalized to 23:59:59.999 UTC of that day so that two
    /// enrollments chosen for the same calendar day compare equal. Adding
    /// months clamps to the last day of shorter months (Jan 31 + 1 month is
    /// the last day of February).
    ///
    /// Returns `None` if either date falls outside years 0 to 9999, the range
    /// a four-digit RFC 3339 year can hold.
    #[must_use]
    pub fn from_start_date(start_date: NaiveDate, length_months: u32) -> Option<Self> {
        let start = end_of_day(start_date)?;
        let end = start.checked_add_months(Months::new(length_months))?;
        if start.year() < MIN_PERIOD_YEAR || end.year() > MAX_PERIOD_YEAR {
            return None;
        }
        Some(Self { start, end })
    }

    /// Whether an `existing` period collides with this one
    ///
    /// The test is `existing.start <= self.end && existing.end > self.start`.
    /// An existing period ending exactly when this one starts does not
    /// collide; one starting exactly when this one ends does.
    #[must_use]
    pub fn collides_with(&self, existing: &Self) -> bool {
        existing.start <= self.end && existing.end > self.start
    }

    /// Whether the period starts before `instant`
    #[must_use]
    pub fn starts_before(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant
    }
}

/// Last representable millisecond of `date` in UTC
#[must_use]
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_starts_at_end_of_day() {
        let period = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 3).unwrap();
        assert_eq!(period.start.date_naive(), date(2024, 1, 10));
        assert_eq!(period.start.hour(), 23);
        assert_eq!(period.start.minute(), 59);
        assert_eq!(period.start.second(), 59);
        assert_eq!(period.start.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_period_end_adds_plan_length() {
        let period = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 3).unwrap();
        let expected = end_of_day(date(2024, 4, 10)).unwrap();
        assert_eq!(period.end, expected);
    }

    #[test]
    fn test_month_addition_clamps_to_month_end() {
        let period = EnrollmentPeriod::from_start_date(date(2024, 1, 31), 1).unwrap();
        assert_eq!(period.end.date_naive(), date(2024, 2, 29));
    }

    #[test]
    fn test_period_past_year_9999_is_rejected() {
        assert!(EnrollmentPeriod::from_start_date(date(9999, 11, 10), 3).is_none());
        assert!(EnrollmentPeriod::from_start_date(date(9989, 12, 31), 120).is_some());
        assert!(EnrollmentPeriod::from_start_date(date(9999, 9, 30), 3).is_some());
    }

    #[test]
    fn test_adjacent_period_does_not_collide() {
        let existing = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 3).unwrap();
        let next = EnrollmentPeriod::from_start_date(date(2024, 4, 10), 3).unwrap();
        assert_eq!(existing.end, next.start);
        assert!(!next.collides_with(&existing));
    }

    #[test]
    fn test_period_one_day_early_collides() {
        let existing = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 3).unwrap();
        let next = EnrollmentPeriod::from_start_date(date(2024, 4, 9), 3).unwrap();
        assert!(next.collides_with(&existing));
    }

    #[test]
    fn test_existing_starting_at_new_end_collides() {
        let new = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 1).unwrap();
        let existing = EnrollmentPeriod::from_start_date(date(2024, 2, 10), 1).unwrap();
        assert_eq!(existing.start, new.end);
        assert!(new.collides_with(&existing));
    }

    #[test]
    fn test_disjoint_periods_do_not_collide() {
        let existing = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 1).unwrap();
        let later = EnrollmentPeriod::from_start_date(date(2024, 6, 1), 1).unwrap();
        assert!(!later.collides_with(&existing));
        assert!(!existing.collides_with(&later));
    }

    #[test]
    fn test_status_follows_canceled_at() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let period = EnrollmentPeriod::from_start_date(date(2024, 1, 10), 1).unwrap();
        let mut enrollment = Enrollment {
            id: 1,
            student_id: 1,
            plan_id: 1,
            start_date: period.start,
            end_date: period.end,
            price: 100.0,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(enrollment.status(), EnrollmentStatus::Active);

        enrollment.canceled_at = Some(now);
        assert_eq!(enrollment.status(), EnrollmentStatus::Canceled);
        assert_eq!(enrollment.period(), period);
    }
}
