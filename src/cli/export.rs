//! CLI command for data export
//!
//! Writes CSV or JSON to a file, or to stdout when no output path is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_accounts_csv, export_full_json, export_transactions_csv};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Transactions as CSV
    Csv,
    /// Accounts as CSV
    Accounts,
    /// Full ledger as JSON
    Json,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> TrackerResult<()> {
    match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Io(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, format, &mut writer, pretty)?;
            writer.flush()?;

            eprintln!(
                "Exported {} transaction(s) to {}",
                storage.ledger().transactions().len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, format, &mut writer, pretty)?;
            if format == ExportFormat::Json {
                writeln!(writer)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    format: ExportFormat,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let ledger = storage.ledger();
    match format {
        ExportFormat::Csv => export_transactions_csv(ledger, writer),
        ExportFormat::Accounts => export_accounts_csv(ledger, writer),
        ExportFormat::Json => export_full_json(ledger, writer, pretty),
    }
}
