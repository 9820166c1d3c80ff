//! Export module for money-tracker
//!
//! - CSV: transactions and accounts (spreadsheet-compatible)
//! - JSON: the full ledger with export metadata

pub mod csv;
pub mod json;

pub use self::csv::{export_accounts_csv, export_transactions_csv, TRANSACTION_HEADER};
pub use self::json::{export_full_json, import_from_json, ExportMetadata, FullExport};
