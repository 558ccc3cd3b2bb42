//! Retry with exponential backoff for idempotent service calls.

use crate::error::{ClientError, ClientResult};
use std::time::Duration;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    /// Initial delay between retries
    initial_delay: Duration,
    /// Maximum delay between retries
    max_delay: Duration,
    /// Backoff multiplier
    multiplier: f64,
    /// Whether to use jitter
    use_jitter: bool,
}

impl RetryPolicy {
    /// Creates a new retry policy
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            use_jitter: true,
        }
    }

    /// Sets the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets whether to use jitter
    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Calculates the delay for a given attempt
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let base_delay =
            self.initial_delay.as_millis() as f64 * self.multiplier.powi((attempt - 1) as i32);

        let capped_delay = base_delay.min(self.max_delay.as_millis() as f64);

        let final_delay = if self.use_jitter {
            // Up to 25% jitter, derived from the attempt number
            let jitter_factor = 0.75 + (attempt as f64 * 0.1 % 0.25);
            capped_delay * jitter_factor
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }

    /// Returns the maximum number of attempts
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Whether a failed call is worth retrying.
    ///
    /// Client-side errors (4xx) and malformed responses will not improve on
    /// a second attempt; transport failures and server errors might.
    pub fn is_retryable(&self, error: &ClientError) -> bool {
        match error {
            ClientError::Transport(e) => match e.status() {
                Some(status) => status.is_server_error(),
                None => true,
            },
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Executes an idempotent operation with retry logic.
///
/// Non-retryable errors surface immediately; retryable ones are reattempted
/// up to the policy's limit with a backoff sleep between attempts. Calls
/// block the current thread, which is the only thread by design.
pub fn with_retry<T, F>(policy: &RetryPolicy, mut operation: F) -> ClientResult<T>
where
    F: FnMut() -> ClientResult<T>,
{
    let mut attempt = 0;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;

                if !policy.is_retryable(&e) {
                    return Err(e);
                }
                if attempt >= policy.max_attempts() {
                    return Err(ClientError::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }

                let delay = policy.delay_for_attempt(attempt);
                log::debug!(
                    "retrying after error (attempt {}/{}, waiting {:?}): {}",
                    attempt,
                    policy.max_attempts(),
                    delay,
                    e
                );
                std::thread::sleep(delay);
            }
        }
    }
}
