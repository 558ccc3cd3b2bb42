//! Client for the backing book-metadata service.
//!
//! Exposes exactly the two operations the bulk-edit harness consumes: a
//! fetch of the current record by identifier and a persist of a corrected
//! record. Fetches are idempotent and retried with exponential backoff;
//! persists are never retried.

mod config;
mod error;
mod retry;
mod service;

pub use config::ServiceConfig;
pub use error::{ClientError, ClientResult};
pub use retry::{with_retry, RetryPolicy};
pub use service::{HttpService, RecordService};
