//! Per-run decision logging.

use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Decision log for one job run.
///
/// Owned by the job driver rather than installed as a process-wide
/// singleton. Every decision line goes to a per-run file under
/// `<log_dir>/<job>/<job>_<timestamp>.log` and is mirrored to the console
/// through the `log` facade. The file handle is released when the logger
/// drops, on every exit path.
pub struct JobLogger {
    name: String,
    file: BufWriter<File>,
    path: PathBuf,
}

impl JobLogger {
    /// Creates the per-run log file, keyed by job name and start time.
    pub fn create(log_dir: &Path, job_name: &str) -> io::Result<Self> {
        let dir = log_dir.join(job_name);
        fs::create_dir_all(&dir)?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{job_name}_{stamp}.log"));
        let file = BufWriter::new(File::create(&path)?);
        Ok(Self {
            name: format!("jobs.{job_name}"),
            file,
            path,
        })
    }

    /// Path of this run's log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Announces the run mode up front so operators never mistake a dry
    /// run for a live one.
    pub fn mode_declaration(&mut self, write_changes: bool) {
        if write_changes {
            self.info("write_changes is TRUE. Permanent modifications may be made.");
        } else {
            self.info("write_changes is FALSE. No external modifications will be made.");
        }
    }

    /// Records identifier, old value and new value ahead of a mutation
    /// attempt. Unlike the convenience levels below, a failed write here
    /// aborts the run: a mutation without an audit trail is not allowed,
    /// so the entry is flushed to disk before this returns.
    pub fn audit(&mut self, id: &str, old: &str, new: &str) -> io::Result<()> {
        let message = format!("{id}\t{old}\t{new}");
        log::info!("{message}");
        self.write_line("INFO", &message)?;
        self.file.flush()
    }

    pub fn info(&mut self, message: &str) {
        log::info!("{message}");
        let _ = self.write_line("INFO", message);
    }

    pub fn debug(&mut self, message: &str) {
        log::debug!("{message}");
        let _ = self.write_line("DEBUG", message);
    }

    pub fn error(&mut self, message: &str) {
        log::error!("{message}");
        let _ = self.write_line("ERROR", message);
        let _ = self.file.flush();
    }

    fn write_line(&mut self, level: &str, message: &str) -> io::Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        writeln!(self.file, "{};{:<8};{} {}", self.name, level, stamp, message)
    }
}
