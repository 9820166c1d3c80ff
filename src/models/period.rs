//! Reporting period representation
//!
//! Supports day, week, month and custom date ranges. All ranges are
//! inclusive on both ends. Weeks run Monday through Sunday.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

use super::transaction::DATE_FORMAT;
use crate::error::{TrackerError, TrackerResult};

/// Which calendar unit a period was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Custom,
}

/// A reporting window over calendar dates
///
/// Bounds are fixed at construction, so a `Period` always names real dates.
/// Weeks at the edges of the representable calendar are clipped to
/// `NaiveDate::MIN`/`NaiveDate::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    kind: PeriodKind,
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            kind: PeriodKind::Day,
            start: date,
            end: date,
        }
    }

    /// The Monday-to-Sunday week containing `date`
    pub fn week_containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        let monday = date
            .checked_sub_signed(Duration::days(offset))
            .unwrap_or(NaiveDate::MIN);
        let sunday = monday
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        Self {
            kind: PeriodKind::Week,
            start: monday,
            end: sunday,
        }
    }

    /// A calendar month; fails for a month outside 1..=12 or an unrepresentable year
    pub fn month(year: i32, month: u32) -> TrackerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TrackerError::InvalidDate(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        let out_of_range = || TrackerError::InvalidDate(format!("year {} is out of range", year));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let last = if month == 12 {
            NaiveDate::from_ymd_opt(year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1).and_then(|next| next.pred_opt())
        }
        .ok_or_else(out_of_range)?;

        Ok(Self {
            kind: PeriodKind::Month,
            start: first,
            end: last,
        })
    }

    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: PeriodKind::Custom,
            start,
            end,
        }
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    /// Get the first date of this period
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Get the last date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered; zero for an inverted custom range
    pub fn num_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.format(DATE_FORMAT);
        let end = self.end.format(DATE_FORMAT);
        match self.kind {
            PeriodKind::Day => write!(f, "{}", start),
            PeriodKind::Week => write!(f, "week of {} ({}..{})", start, start, end),
            PeriodKind::Month => write!(f, "{:04}-{:02}", self.start.year(), self.start.month()),
            PeriodKind::Custom => write!(f, "{}..{}", start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_period() {
        let period = Period::month(2024, 1).unwrap();
        assert_eq!(period.start_date(), date(2024, 1, 1));
        assert_eq!(period.end_date(), date(2024, 1, 31));
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(Period::month(2024, 2).unwrap().end_date(), date(2024, 2, 29));
        assert_eq!(Period::month(2023, 2).unwrap().end_date(), date(2023, 2, 28));
        assert_eq!(Period::month(1900, 2).unwrap().num_days(), 28);
        assert_eq!(Period::month(2000, 2).unwrap().num_days(), 29);
        assert_eq!(Period::month(2024, 4).unwrap().num_days(), 30);
        assert_eq!(Period::month(2024, 12).unwrap().end_date(), date(2024, 12, 31));
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(Period::month(2024, 0), Err(TrackerError::InvalidDate(_))));
        assert!(matches!(Period::month(2024, 13), Err(TrackerError::InvalidDate(_))));
        assert!(matches!(
            Period::month(i32::MAX, 12),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_week_starts_monday() {
        // 2024-01-10 is a Wednesday
        let week = Period::week_containing(date(2024, 1, 10));
        assert_eq!(week.start_date(), date(2024, 1, 8));
        assert_eq!(week.end_date(), date(2024, 1, 14));

        // A Sunday belongs to the week that began the previous Monday
        let week = Period::week_containing(date(2024, 1, 14));
        assert_eq!(week.start_date(), date(2024, 1, 8));

        // A Monday starts its own week
        let week = Period::week_containing(date(2024, 1, 15));
        assert_eq!(week.start_date(), date(2024, 1, 15));
    }

    #[test]
    fn test_week_across_year_boundary() {
        let week = Period::week_containing(date(2025, 1, 1));
        assert_eq!(week.start_date(), date(2024, 12, 30));
        assert_eq!(week.end_date(), date(2025, 1, 5));
    }

    #[test]
    fn test_week_at_calendar_edges_is_clipped() {
        let last = Period::week_containing(NaiveDate::MAX);
        assert!(last.contains(NaiveDate::MAX));
        assert_eq!(last.end_date(), NaiveDate::MAX);
        assert!(last.start_date() <= NaiveDate::MAX);

        let first = Period::week_containing(NaiveDate::MIN);
        assert_eq!(first.start_date(), NaiveDate::MIN);
        assert!(first.contains(NaiveDate::MIN));
        assert_eq!(first.kind(), PeriodKind::Week);
    }

    #[test]
    fn test_month_at_calendar_edges() {
        let last = NaiveDate::MAX;
        let period = Period::month(last.year(), last.month()).unwrap();
        assert_eq!(period.end_date(), last);

        let first = NaiveDate::MIN;
        let period = Period::month(first.year(), first.month()).unwrap();
        assert_eq!(period.start_date(), first);
    }

    #[test]
    fn test_contains() {
        let jan = Period::month(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 15)));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_inverted_custom_range_is_empty() {
        let period = Period::custom(date(2024, 2, 1), date(2024, 1, 1));
        assert_eq!(period.num_days(), 0);
        assert!(!period.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::month(2025, 1).unwrap().to_string(), "2025-01");
        assert_eq!(Period::day(date(2024, 1, 10)).to_string(), "2024-01-10");
        assert_eq!(
            Period::custom(date(2024, 1, 1), date(2024, 1, 31)).to_string(),
            "2024-01-01..2024-01-31"
        );
    }
}
