//! Storage layer for money-tracker
//!
//! The ledger lives in memory and is flushed to a single JSON snapshot
//! after every successful mutation. `Storage` owns the ledger together with
//! the audit logger so services can mutate, save and log in one place.

pub mod file_io;
pub mod init;
pub mod snapshot;

pub use file_io::{read_json_optional, read_json_required, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use snapshot::{Snapshot, SCHEMA_VERSION};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{paths::TrackerPaths, settings::Settings};
use crate::error::TrackerResult;
use crate::ledger::Ledger;

/// Owner of the application state and its files
pub struct Storage {
    paths: TrackerPaths,
    ledger: Ledger,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage, loading the snapshot if one exists
    ///
    /// A missing snapshot yields a fresh ledger seeded with the default
    /// categories. A snapshot whose balances disagree with its transactions
    /// is refused with `CorruptState`.
    pub fn open(paths: TrackerPaths, settings: &Settings) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        let ledger = load_ledger(&paths)?.with_policy(settings.ledger_policy());
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            ledger,
            audit,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Write the snapshot to disk atomically
    pub fn save(&self) -> TrackerResult<()> {
        write_json_atomic(self.paths.data_file(), &Snapshot::from_ledger(&self.ledger))
    }

    /// Re-read the snapshot from disk, keeping the current deletion policy
    pub fn reload(&mut self) -> TrackerResult<()> {
        let policy = self.ledger.policy();
        self.ledger = load_ledger(&self.paths)?.with_policy(policy);
        Ok(())
    }

    /// Check if storage has been initialized (settings written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an updated entity in the audit log, with a field diff
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> TrackerResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(before), Ok(after)) => generate_diff(&before, &after),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> TrackerResult<()> {
        self.audit.log_batch(entries)
    }
}

fn load_ledger(paths: &TrackerPaths) -> TrackerResult<Ledger> {
    match read_json_optional::<Snapshot, _>(paths.data_file())? {
        Some(snapshot) => snapshot.into_ledger(),
        None => Ok(Ledger::with_default_categories()),
    }
}
