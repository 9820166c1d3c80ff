//! Account model
//!
//! Represents a named pot of money (cash, bank, card) with a running balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::TrackerError;

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account name (e.g., "Cash"), unique case-insensitively
    pub name: String,

    /// Balance the account was opened with
    pub initial_balance: Money,

    /// Current balance: initial balance plus every posted transaction
    pub balance: Money,
}

impl Account {
    /// Create a new account whose balance equals its initial balance
    pub fn new(name: impl Into<String>, initial_balance: Money) -> Self {
        Self {
            name: name.into(),
            initial_balance,
            balance: initial_balance,
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        if self.initial_balance.is_negative() {
            return Err(TrackerError::InvalidAmount(format!(
                "initial balance cannot be negative: {}",
                self.initial_balance
            )));
        }

        if !self.initial_balance.is_within_limit() {
            return Err(TrackerError::InvalidAmount(format!(
                "initial balance {} exceeds the limit of {}",
                self.initial_balance,
                Money::MAX_AMOUNT
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}
