//! money-tracker - command-line personal finance tracker
//!
//! This library provides the core of the money-tracker application: an
//! in-memory ledger of income and expense transactions posted to named
//! accounts and categories, with time-windowed summaries. State is flushed
//! to a single JSON snapshot after each successful change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, transaction kinds, periods and the core records
//! - `ledger`: Category and account registries, the transaction ledger,
//!   filters and summaries
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: JSON snapshot persistence
//! - `audit`: Audit logging system
//! - `backup`: Backup creation, retention and restore
//! - `services`: Mutate, save and audit in one step
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `money-tracker` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use money_tracker::ledger::Ledger;
//! use money_tracker::models::{Money, TransactionDraft, TransactionKind};
//!
//! let mut ledger = Ledger::with_default_categories();
//! ledger.create_account("Cash", Money::from_cents(10000))?;
//! ledger.add_transaction(TransactionDraft::new(
//!     Money::from_cents(5000),
//!     TransactionKind::Income,
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     "Salary",
//!     "Cash",
//! ))?;
//!
//! assert_eq!(ledger.balance("cash")?, Money::from_cents(15000));
//! # Ok::<(), money_tracker::error::TrackerError>(())
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
