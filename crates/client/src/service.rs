//! Fetch and persist operations against the backing service.

use crate::config::ServiceConfig;
use crate::error::{ClientError, ClientResult};
use crate::retry::{with_retry, RetryPolicy};
use bookmend_core::RecordKind;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The two operations the bulk-edit harness consumes.
///
/// Implementations are expected to return structured errors the harness can
/// distinguish from success; a record that no longer exists is `Ok(None)`,
/// not an error.
pub trait RecordService {
    /// Fetches the current JSON document for a record by identifier.
    fn fetch(&self, id: &str) -> ClientResult<Option<Value>>;

    /// Persists a corrected record with an edit comment.
    fn persist(&self, id: &str, record: &Value, comment: &str) -> ClientResult<()>;
}

/// HTTP implementation of [`RecordService`].
pub struct HttpService {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl HttpService {
    /// Builds the service from config and logs in when credentials are
    /// present. Writes silently no-op server-side without a session cookie,
    /// so login failures surface here rather than mid-run.
    pub fn new(config: &ServiceConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()?;

        let service = Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::default(),
        };

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            service.login(username, password)?;
        }

        Ok(service)
    }

    /// Replaces the retry policy used for idempotent fetches.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Logs in and verifies the session cookie was set.
    pub fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let url = format!("{}/account/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()?;

        let status = response.status();
        if !status.is_success() && !status.is_redirection() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }
        if response.cookies().next().is_none() {
            return Err(ClientError::Auth("no session cookie set".to_string()));
        }

        log::info!("logged in to {} as {}", self.base_url, username);
        Ok(())
    }

    /// The `.json` document URL for a record identifier.
    fn record_url(&self, id: &str) -> ClientResult<String> {
        let kind = RecordKind::from_id(id)?;
        Ok(format!(
            "{}/{}/{}.json",
            self.base_url,
            kind.path_segment(),
            id
        ))
    }
}

impl RecordService for HttpService {
    fn fetch(&self, id: &str) -> ClientResult<Option<Value>> {
        let url = self.record_url(id)?;

        with_retry(&self.retry, || {
            let response = self.client.get(&url).send()?;

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }

            response
                .json::<Value>()
                .map(Some)
                .map_err(|e| ClientError::InvalidResponse {
                    url: url.clone(),
                    message: e.to_string(),
                })
        })
    }

    fn persist(&self, id: &str, record: &Value, comment: &str) -> ClientResult<()> {
        let url = self.record_url(id)?;

        let mut body = record.clone();
        if let Some(doc) = body.as_object_mut() {
            doc.insert("_comment".to_string(), Value::String(comment.to_string()));
        }

        // Mutations are never retried; a duplicate PUT could double-apply.
        let response = self.client.put(&url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        log::debug!("persisted {} ({})", id, comment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base_url: &str) -> HttpService {
        let config = ServiceConfig::default().with_base_url(base_url);
        HttpService::new(&config).unwrap()
    }

    #[test]
    fn test_record_url_by_kind() {
        let service = service("http://localhost:8080");
        assert_eq!(
            service.record_url("OL25943366M").unwrap(),
            "http://localhost:8080/books/OL25943366M.json"
        );
        assert_eq!(
            service.record_url("OL39307A").unwrap(),
            "http://localhost:8080/authors/OL39307A.json"
        );
        assert_eq!(
            service.record_url("OL2514725W").unwrap(),
            "http://localhost:8080/works/OL2514725W.json"
        );
    }

    #[test]
    fn test_record_url_rejects_bad_identifier() {
        let service = service("http://localhost:8080");
        assert!(matches!(
            service.record_url("not-an-id"),
            Err(ClientError::Record(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let service = service("http://localhost:8080/");
        assert_eq!(
            service.record_url("OL1M").unwrap(),
            "http://localhost:8080/books/OL1M.json"
        );
    }
}
