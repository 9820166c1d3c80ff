//! Snapshot file format
//!
//! The whole ledger is stored as one JSON document. Amounts are integer
//! cents and dates are `YYYY-MM-DD`.

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::ledger::{AccountRegistry, CategoryRegistry, Ledger};
use crate::models::{Account, Category, Transaction, TransactionId, TransactionKind};

/// Current snapshot schema version
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_names(kind: TransactionKind) -> Vec<String> {
    Category::defaults(kind).iter().map(|s| s.to_string()).collect()
}

fn default_income_categories() -> Vec<String> {
    default_names(TransactionKind::Income)
}

fn default_expense_categories() -> Vec<String> {
    default_names(TransactionKind::Expense)
}

/// Serialized form of a [`Ledger`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Next id to assign; recomputed from the stored ids when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_transaction_id: Option<TransactionId>,

    /// Missing lists fall back to the default categories; an empty list stays empty
    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,

    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let categories = ledger.categories();
        Self {
            schema_version: SCHEMA_VERSION,
            next_transaction_id: Some(ledger.next_transaction_id()),
            income_categories: categories.list(TransactionKind::Income).to_vec(),
            expense_categories: categories.list(TransactionKind::Expense).to_vec(),
            accounts: ledger.accounts().list().to_vec(),
            transactions: ledger.transactions().to_vec(),
        }
    }

    /// Rebuild the ledger, checking every invariant
    ///
    /// Anything inconsistent in the stored data (duplicate names, balances
    /// that disagree with the transactions, repeated ids) is reported as
    /// `CorruptState`.
    pub fn into_ledger(self) -> TrackerResult<Ledger> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(TrackerError::Persistence(format!(
                "Snapshot schema version {} is newer than supported version {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        let categories =
            CategoryRegistry::from_lists(self.income_categories, self.expense_categories)
                .map_err(corrupt)?;
        let accounts = AccountRegistry::from_accounts(self.accounts).map_err(corrupt)?;

        Ledger::from_parts(
            categories,
            accounts,
            self.transactions,
            self.next_transaction_id,
        )
        .map_err(corrupt)
    }
}

fn corrupt(err: TrackerError) -> TrackerError {
    match err {
        TrackerError::CorruptState(_) => err,
        other => TrackerError::CorruptState(other.to_string()),
    }
}
