//! The job driver: sequential scan, candidate check, live verify, mutate.

use crate::audit::JobLogger;
use crate::budget::{BudgetStatus, ChangeBudget};
use crate::dump::DumpReader;
use crate::error::{HarnessError, Result};
use crate::gate::DryRunGate;
use crate::job::BulkJob;
use crate::row::{decode_row, DEFAULT_DELIMITER};
use bookmend_client::RecordService;
use std::path::PathBuf;

/// Configuration for one job run. Immutable once built.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Dump file to scan (`.gz` handled transparently)
    pub file: PathBuf,
    /// Maximum number of mutation attempts; 0 = unlimited
    pub limit: u64,
    /// Whether mutations are persisted or only logged
    pub write_changes: bool,
    /// Field delimiter of the dump file
    pub delimiter: char,
    /// Directory that receives per-run log files
    pub log_dir: PathBuf,
}

impl JobConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            limit: 1,
            write_changes: false,
            delimiter: DEFAULT_DELIMITER,
            log_dir: PathBuf::from("logs"),
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_write_changes(mut self, write_changes: bool) -> Self {
        self.write_changes = write_changes;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }
}

/// How a run ended. Both variants are success-like; fatal failures are
/// errors, not outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The dump was scanned to the end.
    Exhausted { rows: u64, changed: u64 },
    /// The change budget was met and the run stopped early on purpose.
    BudgetReached { rows: u64, changed: u64 },
}

/// Drives one bulk-edit job over one dump file.
pub struct JobDriver<S: RecordService> {
    config: JobConfig,
    service: S,
}

impl<S: RecordService> JobDriver<S> {
    /// Accepts an injected service handle; tests substitute a mock.
    pub fn new(config: JobConfig, service: S) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs the job over the whole dump.
    ///
    /// Decode failures, service failures (other than a deleted record) and
    /// audit I/O failures abort the run; the scan position is logged before
    /// the error propagates. The dump handle and the log file are released
    /// on every exit path.
    pub fn run(&self, job: &dyn BulkJob) -> Result<JobOutcome> {
        let mut logger = JobLogger::create(&self.config.log_dir, job.name())?;
        let gate = DryRunGate::new(self.config.write_changes);
        let mut budget = ChangeBudget::new(self.config.limit);

        logger.mode_declaration(self.config.write_changes);
        logger.info(&format!(
            "scanning {} (limit {})",
            self.config.file.display(),
            if self.config.limit == 0 {
                "unlimited".to_string()
            } else {
                self.config.limit.to_string()
            }
        ));

        let reader = DumpReader::open(&self.config.file)?;
        let mut rows: u64 = 0;

        for line in reader.lines() {
            rows += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    logger.error(&format!("aborting at row {rows}: read failed: {e}"));
                    return Err(HarnessError::Io(e));
                }
            };

            match self.process_row(rows, &line, job, &gate, &mut budget, &mut logger) {
                Ok(BudgetStatus::Continue) => {}
                Ok(BudgetStatus::LimitReached) => {
                    logger.info("Modification limit reached. Stopping run.");
                    return Ok(JobOutcome::BudgetReached {
                        rows,
                        changed: budget.changed(),
                    });
                }
                Err(e) => {
                    logger.error(&format!("aborting at row {rows}: {e}"));
                    return Err(e);
                }
            }
        }

        logger.info(&format!(
            "dump exhausted after {rows} rows, {} changes",
            budget.changed()
        ));
        Ok(JobOutcome::Exhausted {
            rows,
            changed: budget.changed(),
        })
    }

    fn process_row(
        &self,
        row_number: u64,
        line: &str,
        job: &dyn BulkJob,
        gate: &DryRunGate,
        budget: &mut ChangeBudget,
        logger: &mut JobLogger,
    ) -> Result<BudgetStatus> {
        let row = decode_row(line, self.config.delimiter)?;

        // CANDIDATE_CHECK: cheap and local. Most rows must be rejected
        // here, before any network call.
        let Some(id) = job.candidate(&row) else {
            logger.debug(&format!("row {row_number}: skipped by local check"));
            return Ok(BudgetStatus::Continue);
        };

        // LIVE_VERIFY: the dump is stale; re-check against current data.
        let live = match self.service.fetch(&id) {
            Ok(Some(live)) => live,
            Ok(None) => {
                logger.info(&format!("{id}: skipped, record no longer exists"));
                return Ok(BudgetStatus::Continue);
            }
            Err(e) => return Err(HarnessError::Service { id, source: e }),
        };
        let Some(change) = job.plan(&id, &live) else {
            logger.info(&format!("{id}: skipped, live record no longer matches"));
            return Ok(BudgetStatus::Continue);
        };

        // MUTATE: audit entry first, then persist through the dry-run gate.
        logger.audit(&id, &change.old_value, &change.new_value)?;
        gate.commit(logger, || {
            self.service.persist(&id, &change.record, job.comment())
        })
        .map_err(|e| HarnessError::Service {
            id: id.clone(),
            source: e,
        })?;

        Ok(budget.record_change())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_config_defaults() {
        let config = JobConfig::new("dump.txt");
        assert_eq!(config.limit, 1);
        assert!(!config.write_changes);
        assert_eq!(config.delimiter, DEFAULT_DELIMITER);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_job_config_builder() {
        let config = JobConfig::new("dump.txt.gz")
            .with_limit(0)
            .with_write_changes(true)
            .with_delimiter('|')
            .with_log_dir("/tmp/runs");

        assert_eq!(config.limit, 0);
        assert!(config.write_changes);
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.log_dir, PathBuf::from("/tmp/runs"));
    }
}
