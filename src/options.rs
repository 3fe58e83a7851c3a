use std::time::Duration;

/// Configures per-attempt timeout and the two retry policies.
///
/// Both backoffs are fixed delays: no exponential growth and no jitter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Delay before retrying a `429` whose call-limit bucket is full.
    pub rate_limit_backoff_ms: u64,
    /// Cap on `429` retries per request. `None` retries for as long as the
    /// server keeps reporting a full bucket.
    pub max_rate_limit_retries: Option<usize>,
    /// Delay before retrying a `5xx` response.
    pub server_error_backoff_ms: u64,
    /// Maximum number of `5xx` retries after the initial attempt.
    pub max_server_error_retries: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }

    pub fn server_error_backoff(&self) -> Duration {
        Duration::from_millis(self.server_error_backoff_ms)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            rate_limit_backoff_ms: 500,
            max_rate_limit_retries: None,
            server_error_backoff_ms: 10_000,
            max_server_error_retries: 30,
            user_agent: concat!("shopify-rest-http/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
