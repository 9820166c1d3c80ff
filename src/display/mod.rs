//! Display formatting for terminal output
//!
//! Turns accounts, categories, transactions and summaries into text for the
//! CLI. Amounts are rendered with the configured currency symbol.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_list, format_category_tree};
pub use report::{format_breakdown, format_summary};
pub use transaction::{format_transaction_details, format_transaction_register};
