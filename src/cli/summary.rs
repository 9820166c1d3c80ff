//! Summary CLI commands
//!
//! Daily, weekly, monthly and custom-range totals, plus per-category
//! breakdowns.

use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::{format_breakdown, format_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Period};
use crate::storage::Storage;

use super::{parse_date_or_today, parse_kind};

/// Summary subcommands
#[derive(Subcommand)]
pub enum SummaryCommands {
    /// Totals for a single day
    Day {
        /// Date (YYYY-MM-DD, defaults to today)
        date: Option<String>,
    },
    /// Totals for the Monday-to-Sunday week containing a date
    Week {
        /// Any date in the week (YYYY-MM-DD, defaults to today)
        date: Option<String>,
    },
    /// Totals for a calendar month
    Month {
        /// Month (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },
    /// Totals for an inclusive date range
    Range {
        /// First date (YYYY-MM-DD)
        start: String,
        /// Last date (YYYY-MM-DD)
        end: String,
    },
    /// Amount per category for one type
    Breakdown {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: String,
        /// First date (YYYY-MM-DD, defaults to the start of this month)
        #[arg(long)]
        from: Option<String>,
        /// Last date (YYYY-MM-DD, defaults to the end of this month)
        #[arg(long)]
        to: Option<String>,
        /// Include categories with no activity
        #[arg(long)]
        all: bool,
    },
}

/// Handle a summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SummaryCommands,
) -> TrackerResult<()> {
    let ledger = storage.ledger();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SummaryCommands::Day { date } => {
            let date = parse_date_or_today(date.as_deref())?;
            let summary = ledger.daily_summary(date);
            print!("{}", format_summary("Daily summary", &summary, symbol));
        }

        SummaryCommands::Week { date } => {
            let date = parse_date_or_today(date.as_deref())?;
            let summary = ledger.weekly_summary(date);
            print!("{}", format_summary("Weekly summary", &summary, symbol));
        }

        SummaryCommands::Month { month } => {
            let (year, month) = match month {
                Some(s) => parse_year_month(&s)?,
                None => {
                    let today = Local::now().date_naive();
                    (today.year(), today.month())
                }
            };
            let summary = ledger.monthly_summary(year, month)?;
            print!("{}", format_summary("Monthly summary", &summary, symbol));
        }

        SummaryCommands::Range { start, end } => {
            let summary = ledger.period_summary(parse_date(&start)?, parse_date(&end)?);
            print!("{}", format_summary("Summary", &summary, symbol));
        }

        SummaryCommands::Breakdown {
            kind,
            from,
            to,
            all,
        } => {
            let kind = parse_kind(&kind)?;
            let (start, end) = breakdown_range(from.as_deref(), to.as_deref())?;
            let breakdown = ledger.breakdown_by_category(kind, start, end, all);

            println!(
                "{} by category, {} to {}",
                capitalize(kind.as_str()),
                start,
                end
            );
            print!("{}", format_breakdown(kind, &breakdown, symbol));
        }
    }

    Ok(())
}

/// Parse `YYYY-MM` into a year and month
fn parse_year_month(input: &str) -> TrackerResult<(i32, u32)> {
    let invalid = || TrackerError::InvalidDate(format!("'{}': expected YYYY-MM", input.trim()));

    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    // Validates the month number and year range
    Period::month(year, month)?;
    Ok((year, month))
}

/// Resolve breakdown bounds; a missing bound falls back to the current month
fn breakdown_range(from: Option<&str>, to: Option<&str>) -> TrackerResult<(NaiveDate, NaiveDate)> {
    let today = Local::now().date_naive();
    let this_month = Period::month(today.year(), today.month())?;

    let start = match from {
        Some(s) => parse_date(s)?,
        None => this_month.start_date(),
    };
    let end = match to {
        Some(s) => parse_date(s)?,
        None => this_month.end_date(),
    };
    Ok((start, end))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
