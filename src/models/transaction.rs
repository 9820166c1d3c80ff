//! Transaction model
//!
//! Represents income and expense transactions. Accounts and categories are
//! referenced by name; the ledger resolves those names through its
//! registries whenever it needs the referent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::TrackerError;

/// Date format used on the command line and in the snapshot file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Apply the kind's sign to a (positive) amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TrackerError::InvalidType(s.to_string())),
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| TrackerError::InvalidDate(format!("'{}': {}", s.trim(), e)))
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, never reused
    pub id: TransactionId,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Category name (weak reference into the category registry)
    pub category: String,

    /// Account name (weak reference into the account registry)
    pub account: String,

    /// Positive amount; the sign comes from `kind`
    pub amount: Money,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Effect of this transaction on its account's balance
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check whether this transaction posts to the named account (case-insensitive)
    pub fn references_account(&self, name: &str) -> bool {
        names_match(&self.account, name)
    }

    /// Check whether this transaction is labelled with the named category of a kind
    pub fn references_category(&self, name: &str, kind: TransactionKind) -> bool {
        self.kind == kind && names_match(&self.category, name)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ({} / {})",
            self.id,
            self.date.format(DATE_FORMAT),
            self.kind,
            self.amount,
            self.category,
            self.account
        )
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: Money,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category: String,
    pub account: String,
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        amount: Money,
        kind: TransactionKind,
        date: NaiveDate,
        category: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            kind,
            date,
            category: category.into(),
            account: account.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Partial update of a transaction
///
/// `None` keeps the current value. For `note`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub amount: Option<Money>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub account: Option<String>,
    pub note: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch over an existing transaction into a draft
    pub fn apply_to(&self, txn: &Transaction) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount.unwrap_or(txn.amount),
            kind: self.kind.unwrap_or(txn.kind),
            date: self.date.unwrap_or(txn.date),
            category: self.category.clone().unwrap_or_else(|| txn.category.clone()),
            account: self.account.clone().unwrap_or_else(|| txn.account.clone()),
            note: match &self.note {
                Some(note) => note.clone(),
                None => txn.note.clone(),
            },
        }
    }
}

/// Case-insensitive comparison of trimmed entity names
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
