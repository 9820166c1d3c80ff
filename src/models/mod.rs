//! Core data models for money-tracker
//!
//! This module contains the data structures of the finance domain:
//! money amounts, accounts, categories, transactions and reporting periods.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::Account;
pub use category::Category;
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{Period, PeriodKind};
pub use transaction::{
    names_match, parse_date, Transaction, TransactionDraft, TransactionKind, TransactionPatch,
    DATE_FORMAT,
};
