//! The seam a concrete bulk-edit script implements.

use crate::row::DumpRow;
use serde_json::Value;

/// One planned correction to a live record.
#[derive(Debug, Clone)]
pub struct PlannedChange {
    /// Value before the correction, for the audit log
    pub old_value: String,
    /// Value after the correction
    pub new_value: String,
    /// Full corrected record to persist
    pub record: Value,
}

/// A scripted bulk edit.
///
/// `candidate` must stay cheap and local: it sees only the stale dump
/// snapshot and has to reject the overwhelming majority of rows before any
/// network round-trip happens — dumps run to millions of rows and the
/// network dominates cost. `plan` re-applies the same predicate to the
/// live record and returns `None` when the record has drifted out of scope
/// (already fixed, deleted, retyped).
pub trait BulkJob {
    /// Short name, used for the log directory and file names.
    fn name(&self) -> &str;

    /// Edit summary recorded with every persisted change.
    fn comment(&self) -> &str;

    /// Cheap structural predicate against the dump snapshot. Returns the
    /// record identifier when the row is a candidate for correction.
    fn candidate(&self, row: &DumpRow) -> Option<String>;

    /// Re-applies the predicate to the live record and builds the
    /// correction.
    fn plan(&self, id: &str, live: &Value) -> Option<PlannedChange>;
}
