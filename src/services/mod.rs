//! Service layer for money-tracker
//!
//! Services wrap ledger mutations with persistence and auditing: each one
//! applies the change in memory, saves the snapshot, then appends to the
//! audit log. A rejected change touches neither file.

pub mod account;
pub mod category;
pub mod transaction;

pub use account::{AccountService, AccountSummary};
pub use category::CategoryService;
pub use transaction::{TransactionFilter, TransactionService};
