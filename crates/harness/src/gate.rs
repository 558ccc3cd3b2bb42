//! Dry-run protection around the persistence step.

use crate::audit::JobLogger;

/// Decides whether a mutation is actually persisted or only logged.
#[derive(Debug, Clone, Copy)]
pub struct DryRunGate {
    write_changes: bool,
}

impl DryRunGate {
    pub fn new(write_changes: bool) -> Self {
        Self { write_changes }
    }

    pub fn write_enabled(&self) -> bool {
        self.write_changes
    }

    /// Runs the commit action when writes are enabled, exactly once; its
    /// errors propagate untouched. In dry-run mode the action is never
    /// invoked and a suppression line is logged instead. The gate itself
    /// never fails.
    pub fn commit<E>(
        &self,
        logger: &mut JobLogger,
        action: impl FnOnce() -> Result<(), E>,
    ) -> Result<(), E> {
        if self.write_changes {
            action()
        } else {
            logger.info("Modification not made because write_changes is false.");
            Ok(())
        }
    }
}
