//! JSON export
//!
//! A full export wraps the ledger snapshot with export metadata. It can be
//! read back and checked with the same rules used when loading `data.json`.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Ledger;
use crate::models::DATE_FORMAT;
use crate::storage::{Snapshot, SCHEMA_VERSION};

/// Full ledger export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Snapshot schema version of `data`
    pub schema_version: u32,

    pub exported_at: DateTime<Utc>,

    /// Version of money-tracker that wrote the export
    pub app_version: String,

    pub data: Snapshot,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub category_count: usize,
    pub transaction_count: usize,

    /// Date of the earliest transaction, if any
    pub earliest_transaction: Option<String>,

    /// Date of the latest transaction, if any
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let transactions = ledger.transactions();

        let metadata = ExportMetadata {
            account_count: ledger.accounts().len(),
            category_count: ledger.categories().all().count(),
            transaction_count: transactions.len(),
            // Transactions are kept in date order
            earliest_transaction: transactions
                .first()
                .map(|t| t.date.format(DATE_FORMAT).to_string()),
            latest_transaction: transactions
                .last()
                .map(|t| t.date.format(DATE_FORMAT).to_string()),
        };

        Self {
            schema_version: SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data: Snapshot::from_ledger(ledger),
            metadata,
        }
    }

    /// Rebuild the exported ledger, checking every invariant
    pub fn validate(&self) -> TrackerResult<Ledger> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(TrackerError::Persistence(format!(
                "Export schema version {} is newer than supported version {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }
        self.data.clone().into_ledger()
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(ledger: &Ledger, writer: W, pretty: bool) -> TrackerResult<()> {
    let export = FullExport::from_ledger(ledger);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Json(format!("Failed to write export: {}", e)))
}

/// Parse a JSON export and verify it
pub fn import_from_json(json_str: &str) -> TrackerResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)
        .map_err(|e| TrackerError::Json(format!("Failed to parse export: {}", e)))?;
    export.validate()?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionDraft, TransactionKind};
    use chrono::NaiveDate;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::with_default_categories();
        ledger.create_account("Cash", Money::from_cents(10000)).unwrap();
        for (day, kind, category) in [
            (20, TransactionKind::Expense, "Food"),
            (3, TransactionKind::Income, "Gift"),
        ] {
            ledger
                .add_transaction(TransactionDraft::new(
                    Money::from_cents(1000),
                    kind,
                    NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    category,
                    "Cash",
                ))
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_metadata() {
        let export = FullExport::from_ledger(&sample_ledger());
        assert_eq!(export.metadata.account_count, 1);
        assert_eq!(export.metadata.category_count, 12);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-03-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-03-20"));
    }

    #[test]
    fn test_export_and_import() {
        let ledger = sample_ledger();
        let mut output = Vec::new();
        export_full_json(&ledger, &mut output, true).unwrap();

        let json = String::from_utf8(output).unwrap();
        let export = import_from_json(&json).unwrap();
        assert_eq!(export.data, Snapshot::from_ledger(&ledger));
        assert_eq!(export.app_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_import_rejects_inconsistent_export() {
        let mut export = FullExport::from_ledger(&sample_ledger());
        export.data.accounts[0].balance = Money::zero();
        let json = serde_json::to_string(&export).unwrap();

        assert!(matches!(
            import_from_json(&json),
            Err(TrackerError::CorruptState(_))
        ));
        assert!(matches!(
            import_from_json("not json"),
            Err(TrackerError::Json(_))
        ));
    }
}
