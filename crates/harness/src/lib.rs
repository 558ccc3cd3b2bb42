//! Bulk-edit job harness.
//!
//! A job walks a point-in-time dump export of the backing service, picks
//! candidate rows with a cheap local predicate, re-verifies each candidate
//! against the live service (records may have drifted since the dump was
//! taken), and applies a bounded number of audited writes with dry-run
//! protection.
//!
//! The scan is single-threaded and strictly sequential so that every
//! mutation is attributable to one coherent scan position and the audit
//! log replays in order.

mod audit;
mod budget;
mod driver;
mod dump;
mod error;
mod gate;
mod job;
mod row;

pub use audit::JobLogger;
pub use budget::{BudgetStatus, ChangeBudget};
pub use driver::{JobConfig, JobDriver, JobOutcome};
pub use dump::DumpReader;
pub use error::{HarnessError, Result};
pub use gate::DryRunGate;
pub use job::{BulkJob, PlannedChange};
pub use row::{decode_row, DumpRow, DEFAULT_DELIMITER};
