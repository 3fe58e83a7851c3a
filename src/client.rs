use std::fmt;

use crate::{
    Body, ClientOptions, Headers, Method, ReqwestTransport, Request, RequestExecutor, Response,
    Result,
};

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Clone)]
/// HTTP client for the Shopify Admin REST API.
///
/// Every verb runs through a [`RequestExecutor`], so rate-limit and
/// server-error retries apply uniformly. The client holds no per-request
/// state and can be cloned freely across tasks.
pub struct ShopifyHttpClient {
    executor: RequestExecutor<ReqwestTransport>,
    default_headers: Headers,
}

impl fmt::Debug for ShopifyHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .default_headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
                    (name, "<redacted>")
                } else {
                    (name, value)
                }
            })
            .collect();
        f.debug_struct("ShopifyHttpClient")
            .field("default_headers", &headers)
            .field("options", self.executor.options())
            .finish()
    }
}

impl Default for ShopifyHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopifyHttpClient {
    /// Creates a client with default options and no default headers.
    pub fn new() -> Self {
        let options = ClientOptions::default();
        Self {
            executor: RequestExecutor::new(ReqwestTransport::new(&options), options),
            default_headers: Headers::new(),
        }
    }

    /// Creates a client that sends `token` as `X-Shopify-Access-Token`.
    pub fn with_access_token(token: impl AsRef<str>) -> Self {
        Self::new().with_default_header(ACCESS_TOKEN_HEADER, token.as_ref().trim())
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `SHOPIFY_ACCESS_TOKEN` — Admin API access token (required)
    /// - `SHOPIFY_HTTP_TIMEOUT_MS` — per-attempt timeout (optional)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shopify_rest_http::ShopifyHttpClient;
    ///
    /// let shop = ShopifyHttpClient::from_env().expect("missing SHOPIFY_ACCESS_TOKEN");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let token = std::env::var("SHOPIFY_ACCESS_TOKEN")
            .map_err(|_| "missing SHOPIFY_ACCESS_TOKEN environment variable".to_owned())?;
        if token.trim().is_empty() {
            return Err("SHOPIFY_ACCESS_TOKEN is set but empty".to_owned());
        }

        let mut options = ClientOptions::default();
        if let Ok(timeout) = std::env::var("SHOPIFY_HTTP_TIMEOUT_MS") {
            options.timeout_ms = timeout.trim().parse().map_err(|_| {
                format!("SHOPIFY_HTTP_TIMEOUT_MS must be an integer, got '{timeout}'")
            })?;
        }

        Ok(Self::with_access_token(token).with_options(options))
    }

    /// Applies client options such as timeout and retry behavior.
    ///
    /// The underlying `reqwest::Client` is kept, so this composes with
    /// [`Self::with_http_client`] in either order.
    pub fn with_options(self, opts: ClientOptions) -> Self {
        let http = self.executor.transport().http().clone();
        Self {
            executor: RequestExecutor::new(ReqwestTransport::with_client(http, &opts), opts),
            default_headers: self.default_headers,
        }
    }

    /// Uses a caller-configured `reqwest::Client` for all requests.
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        let options = self.executor.options().clone();
        let transport = ReqwestTransport::with_client(http, &options);
        Self {
            executor: RequestExecutor::new(transport, options),
            default_headers: self.default_headers,
        }
    }

    /// Adds a header sent with every request. Per-call headers win.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn options(&self) -> &ClientOptions {
        self.executor.options()
    }

    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Sends a `GET` request.
    pub async fn get<H: Into<Headers>>(&self, url: &str, headers: H) -> Result<Response> {
        self.send(Request::new(Method::Get, url), headers.into()).await
    }

    /// Sends a `POST` request with `body`.
    pub async fn post<B, H>(&self, url: &str, body: B, headers: H) -> Result<Response>
    where
        B: Into<Body>,
        H: Into<Headers>,
    {
        self.send(Request::new(Method::Post, url).with_body(body), headers.into())
            .await
    }

    /// Sends a `PUT` request with `body`.
    pub async fn put<B, H>(&self, url: &str, body: B, headers: H) -> Result<Response>
    where
        B: Into<Body>,
        H: Into<Headers>,
    {
        self.send(Request::new(Method::Put, url).with_body(body), headers.into())
            .await
    }

    /// Sends a `DELETE` request.
    pub async fn delete<H: Into<Headers>>(&self, url: &str, headers: H) -> Result<Response> {
        self.send(Request::new(Method::Delete, url), headers.into()).await
    }

    /// Executes a prebuilt request. Default headers are applied underneath
    /// the request's own headers.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.send(request, Headers::new()).await
    }

    async fn send(&self, request: Request, headers: Headers) -> Result<Response> {
        let merged = self
            .default_headers
            .clone()
            .merged(request.headers())
            .merged(&headers);
        let request = request.with_headers(merged);
        self.executor.execute(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::{ShopifyHttpClient, ACCESS_TOKEN_HEADER};
    use crate::ClientOptions;

    #[test]
    fn access_token_is_trimmed_into_default_header() {
        let client = ShopifyHttpClient::with_access_token("  shpat_abc  ");
        assert_eq!(
            client.default_headers().get(ACCESS_TOKEN_HEADER),
            Some("shpat_abc")
        );
    }

    #[test]
    fn debug_redacts_access_token() {
        let client = ShopifyHttpClient::with_access_token("secret-token")
            .with_default_header("Accept", "application/json");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("application/json"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn with_options_keeps_default_headers() {
        let client = ShopifyHttpClient::with_access_token("t").with_options(ClientOptions {
            max_server_error_retries: 3,
            ..ClientOptions::default()
        });
        assert_eq!(client.options().max_server_error_retries, 3);
        assert_eq!(client.default_headers().len(), 1);
    }
}
