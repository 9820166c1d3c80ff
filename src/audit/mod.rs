//! Audit logging system for money-tracker
//!
//! Every successful mutation appends one line to `audit.log` recording what
//! changed, with before/after values. The log is append-only JSONL and
//! doubles as the application's activity log.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: appends entries and reads them back
//! - `generate_diff`: field-level summary of an update

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
