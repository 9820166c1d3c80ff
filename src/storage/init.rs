//! Storage initialization
//!
//! Handles first-run setup: default settings and a snapshot seeded with the
//! default categories.

use crate::config::{paths::TrackerPaths, settings::Settings};
use crate::error::TrackerError;
use crate::ledger::Ledger;

use super::file_io::write_json_atomic;
use super::snapshot::Snapshot;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched. Returns `true` if anything was written.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<bool, TrackerError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    if !paths.data_file().exists() {
        let ledger = Ledger::with_default_categories();
        write_json_atomic(paths.data_file(), &Snapshot::from_ledger(&ledger))?;
        created = true;
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TrackerPaths) -> bool {
    !paths.settings_file().exists() || !paths.data_file().exists()
}
