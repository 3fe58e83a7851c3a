use tokio::time::sleep;

use crate::{
    transport::{Connection, Transport},
    ClientOptions, Request, Response, Result, ShopifyHttpError,
};

/// Runs a request through a [`Transport`] with Shopify's retry policies.
///
/// - `429` with a call-limit header that still shows capacity fails fast with
///   [`ShopifyHttpError::RateLimitExceeded`].
/// - Any other `429` (full bucket, or header missing/malformed) waits
///   [`ClientOptions::rate_limit_backoff_ms`] and retries. These retries do not
///   count against the server-error budget.
/// - `5xx` waits [`ClientOptions::server_error_backoff_ms`] and retries until
///   [`ClientOptions::max_server_error_retries`] is spent; the last `5xx` is
///   then returned as a normal response.
///
/// Each call to [`execute`](Self::execute) owns its connection and retry
/// counters; nothing is shared between invocations.
#[derive(Clone, Debug)]
pub struct RequestExecutor<T> {
    transport: T,
    options: ClientOptions,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `request`, retrying per policy, and returns the final response.
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        let mut connection = self.transport.connect(request)?;
        let mut retry = RetryState::new(&self.options);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let mut response = connection.exchange().await?;
            response.attempts = attempts;

            if response.is_rate_limited() {
                let call_limit = response.call_limit();
                if call_limit.is_some_and(|limit| limit.has_capacity()) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        method = %request.method(),
                        url = request.url(),
                        ?call_limit,
                        "429 received while call limit bucket has capacity"
                    );
                    return Err(ShopifyHttpError::RateLimitExceeded {
                        call_limit,
                        body: response.text().into_owned(),
                    });
                }

                if retry.take_rate_limit_retry() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        method = %request.method(),
                        url = request.url(),
                        attempt = attempts,
                        "call limit bucket full, retrying after {} ms",
                        self.options.rate_limit_backoff_ms
                    );
                    sleep(self.options.rate_limit_backoff()).await;
                    continue;
                }
            } else if response.is_server_error() && retry.take_server_error_retry() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    method = %request.method(),
                    url = request.url(),
                    status = response.status,
                    attempt = attempts,
                    remaining = retry.server_error_retries_left,
                    "server error, retrying after {} ms",
                    self.options.server_error_backoff_ms
                );
                sleep(self.options.server_error_backoff()).await;
                continue;
            }

            return Ok(response);
        }
    }
}

/// Per-invocation retry counters.
#[derive(Debug)]
struct RetryState {
    server_error_retries_left: usize,
    rate_limit_retries: usize,
    max_rate_limit_retries: Option<usize>,
}

impl RetryState {
    fn new(options: &ClientOptions) -> Self {
        Self {
            server_error_retries_left: options.max_server_error_retries,
            rate_limit_retries: 0,
            max_rate_limit_retries: options.max_rate_limit_retries,
        }
    }

    fn take_rate_limit_retry(&mut self) -> bool {
        if self
            .max_rate_limit_retries
            .is_some_and(|max| self.rate_limit_retries >= max)
        {
            return false;
        }
        self.rate_limit_retries += 1;
        true
    }

    fn take_server_error_retry(&mut self) -> bool {
        if self.server_error_retries_left == 0 {
            return false;
        }
        self.server_error_retries_left -= 1;
        true
    }
}
