//! Category model
//!
//! A category is a name tagged with the kind of transaction it labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionKind;

/// Default income categories for a fresh ledger
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Business", "Investment", "Gift", "Other Income"];

/// Default expense categories for a fresh ledger
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Entertainment",
    "Bills",
    "Shopping",
    "Healthcare",
    "Other Expense",
];

/// A category name together with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kind: TransactionKind,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Default category names for a kind
    pub fn defaults(kind: TransactionKind) -> &'static [&'static str] {
        match kind {
            TransactionKind::Income => DEFAULT_INCOME_CATEGORIES,
            TransactionKind::Expense => DEFAULT_EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
