//! Audit CLI command
//!
//! Shows the most recent entries of the audit log.

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Print the last `limit` audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> TrackerResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    println!();
    println!(
        "Showing {} entr{} from {}",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        storage.audit().path().display()
    );
    Ok(())
}
