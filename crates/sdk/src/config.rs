//! Configuration types for the Orbital SDK.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Configuration for the Orbital client.
///
/// Built once by the client builder and shared immutably for the lifetime of
/// the client; reconfiguration means constructing a new client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Orbital agents API.
    pub base_url: Url,
    /// API key sent in the `X-Orbital-Agents-Api-Key` header.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Retry configuration.
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }
}

/// Configuration for transport-level retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
    /// HTTP status codes to retry on.
    pub retry_on_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            retry_on_status_codes: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Calculate backoff duration for a given attempt.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let backoff = Duration::from_millis(backoff_ms as u64);
        std::cmp::min(backoff, self.max_backoff)
    }

    /// Check if a status code should trigger a retry.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status_codes.contains(&status)
    }
}

/// Options for waiting on an execution to reach a terminal state.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between status checks.
    pub interval: Duration,
    /// Total polling budget.
    pub timeout: Duration,
    /// When false (the default), the budget is counted in attempts
    /// (`timeout / interval` iterations), so slow status fetches can stretch
    /// the wall-clock time past `timeout`. When true, the loop stops at an
    /// absolute deadline instead.
    pub deadline_based: bool,
    /// Optional token to abort the wait early. Leaving this unset keeps the
    /// wait running until a terminal state or the timeout.
    pub cancellation: Option<CancellationToken>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(3600),
            deadline_based: false,
            cancellation: None,
        }
    }
}

impl PollOptions {
    /// Create options with the given interval and timeout.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            ..Default::default()
        }
    }

    /// Switch the budget from attempt counting to an absolute deadline.
    pub fn with_deadline(mut self) -> Self {
        self.deadline_based = true;
        self
    }

    /// Attach a cancellation token to abort the wait early.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Number of polling attempts the budget allows.
    pub fn max_attempts(&self) -> u64 {
        let interval_ms = self.interval.as_millis().max(1);
        (self.timeout.as_millis() / interval_ms) as u64
    }
}
