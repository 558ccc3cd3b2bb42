use bookmend_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("malformed row: expected at least 5 fields, found {found}")]
    MissingRecordField { found: usize },

    #[error("invalid JSON in record field: {0}")]
    InvalidRecordJson(#[from] serde_json::Error),

    #[error("service error for {id}: {source}")]
    Service {
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
