//! Custom error types for money-tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::TransactionKind;

/// The main error type for money-tracker operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A category with the same name already exists for the kind
    #[error("{kind} category already exists: {name}")]
    DuplicateCategory { name: String, kind: TransactionKind },

    /// An account with the same name already exists
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Deletion blocked because transactions still reference the entity
    #[error("{entity_type} '{identifier}' is used by {count} transaction(s)")]
    InUse {
        entity_type: &'static str,
        identifier: String,
        count: usize,
    },

    /// Amount is zero, negative where not allowed, or unparseable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Date is malformed or out of range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Transaction type is neither income nor expense
    #[error("Invalid transaction type: '{0}' (expected income or expense)")]
    InvalidType(String),

    /// Transaction references a category that does not exist for its kind
    #[error("Unknown {kind} category: {name}")]
    UnknownCategory { name: String, kind: TransactionKind },

    /// Transaction references an account that does not exist
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Snapshot could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// In-memory invariant violated (e.g. a balance that disagrees with its transactions)
    #[error("Corrupt ledger state: {0}")]
    CorruptState(String),
}

impl TrackerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error of any flavour
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidAmount(_)
                | Self::InvalidDate(_)
                | Self::InvalidType(_)
        )
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for money-tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::account_not_found("Cash");
        assert_eq!(err.to_string(), "Account not found: Cash");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_in_use_error() {
        let err = TrackerError::InUse {
            entity_type: "Category",
            identifier: "Food".into(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Category 'Food' is used by 3 transaction(s)"
        );
    }

    #[test]
    fn test_unknown_category_mentions_kind() {
        let err = TrackerError::UnknownCategory {
            name: "Salary".into(),
            kind: TransactionKind::Expense,
        };
        assert_eq!(err.to_string(), "Unknown expense category: Salary");
    }

    #[test]
    fn test_validation_family() {
        assert!(TrackerError::InvalidAmount("0".into()).is_validation());
        assert!(TrackerError::InvalidType("gift".into()).is_validation());
        assert!(!TrackerError::UnknownAccount("Bank".into()).is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
