//! Period summaries and category breakdowns
//!
//! All summaries are computed on demand from the transaction list. An
//! inverted range or a range with no activity yields zero totals.
//! Totals saturate at the `Money` bounds rather than wrapping.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::Ledger;
use crate::error::TrackerResult;
use crate::models::{Money, Period, TransactionKind};

/// Totals over an inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
    pub count: usize,
}

/// Category name to summed amount, ordered by name
pub type CategoryBreakdown = BTreeMap<String, Money>;

impl Ledger {
    /// Income, expense and net over `start..=end`
    pub fn period_summary(&self, start: NaiveDate, end: NaiveDate) -> Summary {
        let mut income = Money::zero();
        let mut expense = Money::zero();
        let mut count = 0;

        for txn in self.filter_by_date_range(start, end) {
            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => expense += txn.amount,
            }
            count += 1;
        }

        Summary {
            start,
            end,
            income,
            expense,
            net: income - expense,
            count,
        }
    }

    pub fn summarize(&self, period: &Period) -> Summary {
        self.period_summary(period.start_date(), period.end_date())
    }

    pub fn daily_summary(&self, date: NaiveDate) -> Summary {
        self.summarize(&Period::day(date))
    }

    /// Summary of the Monday-to-Sunday week containing `date`
    pub fn weekly_summary(&self, date: NaiveDate) -> Summary {
        self.summarize(&Period::week_containing(date))
    }

    pub fn monthly_summary(&self, year: i32, month: u32) -> TrackerResult<Summary> {
        Ok(self.summarize(&Period::month(year, month)?))
    }

    /// Amount per category for one kind over `start..=end`
    ///
    /// With `include_empty`, every registered category of the kind appears,
    /// idle ones at zero. Names no longer registered still appear while they
    /// carry activity in the range.
    pub fn breakdown_by_category(
        &self,
        kind: TransactionKind,
        start: NaiveDate,
        end: NaiveDate,
        include_empty: bool,
    ) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::new();

        if include_empty {
            for name in self.categories.list(kind) {
                breakdown.insert(name.clone(), Money::zero());
            }
        }

        for txn in self
            .filter_by_date_range(start, end)
            .filter(|t| t.kind == kind)
        {
            *breakdown.entry(txn.category.clone()).or_default() += txn.amount;
        }

        breakdown
    }
}
