//! Transaction identifiers
//!
//! Ids are handed out by the ledger from a monotonically increasing counter
//! and are never reused, so a stale id from a deleted transaction always
//! resolves to "not found" rather than to some newer record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a transaction within a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// The first id a fresh ledger assigns
    pub const FIRST: Self = Self(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TransactionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for TransactionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = TransactionId::new(42);
        assert_eq!(id.to_string(), "#42");
        assert_eq!("#42".parse::<TransactionId>().unwrap(), id);
        assert_eq!(" 42 ".parse::<TransactionId>().unwrap(), id);
        assert!("abc".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_next_is_monotonic() {
        assert_eq!(TransactionId::FIRST.next().value(), 2);
        assert!(TransactionId::FIRST < TransactionId::FIRST.next());
    }

    #[test]
    fn test_serialization() {
        let id = TransactionId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
