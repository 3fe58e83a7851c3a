use std::{borrow::Cow, fmt};

use reqwest::header::HeaderMap;

use crate::{Body, CallLimit, Headers, Result, ShopifyHttpError};

/// HTTP verbs supported by the Shopify REST transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully described request. Built once, then only read by the executor.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Headers,
    body: Option<Body>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<Body>) -> Self {
        Self::new(Method::Post, url).with_body(body)
    }

    pub fn put(url: impl Into<String>, body: impl Into<Body>) -> Self {
        Self::new(Method::Put, url).with_body(body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Applies every header in `headers`, replacing values of existing names.
    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = self.headers.merged(&headers.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

/// Final response of a request, after any retries.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    /// Body bytes exactly as received.
    pub body: Vec<u8>,
    /// Number of transport exchanges performed to obtain this response.
    pub attempts: u32,
}

impl Response {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            attempts: 1,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    pub fn call_limit(&self) -> Option<CallLimit> {
        CallLimit::from_headers(&self.headers)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// The body as UTF-8, or `None` when it is not valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// The body as text, with invalid UTF-8 sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|err| {
            ShopifyHttpError::Decode(format!(
                "invalid response JSON: {err}; body: {}",
                self.text()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::{Method, Request, Response};
    use crate::{Body, CallLimit, ShopifyHttpError};

    #[test]
    fn request_builders_set_method_and_body() {
        let request = Request::post("https://shop/admin/products.json", json!({"a": 1}))
            .with_header("Accept", "application/json")
            .with_headers([("accept", "text/plain"), ("X-Extra", "1")]);

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), "https://shop/admin/products.json");
        assert_eq!(request.body(), Some(&Body::Json(json!({"a": 1}))));
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers().get("Accept"), Some("text/plain"));

        assert_eq!(Request::delete("u").method().as_str(), "DELETE");
        assert!(Request::get("u").body().is_none());
    }

    #[test]
    fn response_helpers_read_status_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-shopify-shop-api-call-limit",
            HeaderValue::from_static("3/40"),
        );
        let response = Response::new(503, headers, "{}");

        assert!(response.is_server_error());
        assert!(!response.is_success());
        assert_eq!(response.header("X-Shopify-Shop-Api-Call-Limit"), Some("3/40"));
        assert_eq!(response.call_limit(), Some(CallLimit { used: 3, limit: 40 }));
        assert_eq!(response.attempts, 1);
    }

    #[test]
    fn body_bytes_are_kept_verbatim() {
        let response = Response::new(200, HeaderMap::new(), vec![0x7b, 0xff, 0xfe, 0x7d]);

        assert_eq!(response.body, [0x7b, 0xff, 0xfe, 0x7d]);
        assert_eq!(response.body_str(), None);
        assert_eq!(response.text(), "{\u{fffd}\u{fffd}}");

        let utf8 = Response::new(200, HeaderMap::new(), "caf\u{e9}");
        assert_eq!(utf8.body_str(), Some("caf\u{e9}"));
    }

    #[test]
    fn json_decode_error_includes_body() {
        let response = Response::new(200, HeaderMap::new(), "not json");
        let err = response
            .json::<serde_json::Value>()
            .expect_err("must fail");
        match err {
            ShopifyHttpError::Decode(message) => assert!(message.contains("not json")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
