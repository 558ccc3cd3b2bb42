use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid response body from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error(transparent)]
    Record(#[from] bookmend_core::RecordError),

    #[error("login failed: {0}")]
    Auth(String),

    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: usize, last_error: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
