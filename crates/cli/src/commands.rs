// FILE: crates/cli/src/commands.rs

use crate::jobs::TrimTitlesJob;
use anyhow::{Context, Result};
use bookmend_client::{HttpService, ServiceConfig};
use bookmend_harness::{JobConfig, JobDriver, JobOutcome};
use clap::ArgMatches;
use std::path::Path;

pub fn trim_titles(matches: &ArgMatches) -> Result<()> {
    let service_config = load_service_config(matches)?;
    let job_config = job_config_from(matches)?;

    let service =
        HttpService::new(&service_config).context("Failed to initialize service client")?;
    let driver = JobDriver::new(job_config, service);

    match driver.run(&TrimTitlesJob).context("Job run failed")? {
        JobOutcome::Exhausted { rows, changed } => {
            log::info!("finished: scanned {rows} rows, {changed} changes");
        }
        JobOutcome::BudgetReached { rows, changed } => {
            // An intentional stop, not an error: the operator's cap was hit.
            log::info!("stopped at change limit after {rows} rows, {changed} changes");
        }
    }
    Ok(())
}

fn load_service_config(matches: &ArgMatches) -> Result<ServiceConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ServiceConfig::load_from(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => ServiceConfig::load().context("Failed to load service config")?,
    };
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    Ok(config)
}

fn job_config_from(matches: &ArgMatches) -> Result<JobConfig> {
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow::anyhow!("Dump file is required"))?;
    let limit = matches.get_one::<u64>("limit").copied().unwrap_or(1);
    let write_changes = matches
        .get_one::<bool>("write-changes")
        .copied()
        .unwrap_or(false);
    let log_dir = matches
        .get_one::<String>("log-dir")
        .map(String::as_str)
        .unwrap_or("logs");

    Ok(JobConfig::new(file)
        .with_limit(limit)
        .with_write_changes(write_changes)
        .with_log_dir(log_dir))
}
