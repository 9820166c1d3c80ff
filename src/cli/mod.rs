//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod backup;
pub mod category;
pub mod config;
pub mod export;
pub mod filter;
pub mod summary;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportFormat};
pub use filter::{handle_filter_command, FilterCommands};
pub use summary::{handle_summary_command, SummaryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Money, TransactionKind};

/// Parse a user-supplied amount ("20", "20.5", "$20.50")
pub(crate) fn parse_amount(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| TrackerError::InvalidAmount(e.to_string()))
}

pub(crate) fn parse_kind(input: &str) -> TrackerResult<TransactionKind> {
    input.parse()
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>) -> TrackerResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}
