//! Transport primitive wrapped by [`RequestExecutor`](crate::RequestExecutor).
//!
//! A [`Transport`] opens one [`Connection`] per logical request. The executor
//! owns that connection for the whole retry loop and drops it on every exit
//! path, so implementations release their resources in `Drop`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::{Body, ClientOptions, Request, Response, Result, ShopifyHttpError};

/// Opens connections for requests.
pub trait Transport: Send + Sync {
    type Connection: Connection;

    /// Prepares `request` for sending. No network I/O happens here.
    fn connect(&self, request: &Request) -> Result<Self::Connection>;
}

/// A prepared request that can be sent repeatedly.
#[async_trait]
pub trait Connection: Send {
    /// Sends the request once and reads the complete response.
    ///
    /// Non-success status codes are returned as responses; only failures
    /// that produced no status are errors.
    async fn exchange(&mut self) -> Result<Response>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout: Duration,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new(options: &ClientOptions) -> Self {
        Self::with_client(reqwest::Client::new(), options)
    }

    /// Uses a caller-configured `reqwest::Client` (proxies, custom TLS roots).
    pub fn with_client(http: reqwest::Client, options: &ClientOptions) -> Self {
        Self {
            http,
            timeout: options.timeout(),
            user_agent: options.user_agent.clone(),
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl Transport for ReqwestTransport {
    type Connection = ReqwestConnection;

    fn connect(&self, request: &Request) -> Result<ReqwestConnection> {
        let mut builder = self
            .http
            .request(request.method().into(), request.url())
            .timeout(self.timeout);

        if !request.headers().contains(header::USER_AGENT.as_str()) {
            builder = builder.header(header::USER_AGENT, &self.user_agent);
        }
        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }

        builder = match request.body() {
            None => builder,
            Some(Body::Text(text)) => builder.body(text.clone()),
            Some(Body::Bytes(bytes)) => builder.body(bytes.clone()),
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Form(fields)) => builder.form(fields),
        };

        Ok(ReqwestConnection {
            http: self.http.clone(),
            request: builder.build()?,
        })
    }
}

/// Connection produced by [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestConnection {
    http: reqwest::Client,
    request: reqwest::Request,
}

#[async_trait]
impl Connection for ReqwestConnection {
    async fn exchange(&mut self) -> Result<Response> {
        let request = self.request.try_clone().ok_or_else(|| {
            ShopifyHttpError::InvalidRequest("request body cannot be replayed".to_owned())
        })?;

        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ReqwestTransport, Transport};
    use crate::{Body, ClientOptions, Request, ShopifyHttpError};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&ClientOptions::default())
    }

    #[test]
    fn connect_prepares_method_headers_and_json_body() {
        let request = Request::put(
            "https://shop.example/admin/products/1.json",
            json!({"id": 1}),
        )
        .with_header("X-Shopify-Access-Token", "shpat_x");
        let connection = transport().connect(&request).expect("must prepare");

        let prepared = &connection.request;
        assert_eq!(prepared.method(), &reqwest::Method::PUT);
        assert_eq!(prepared.headers()["x-shopify-access-token"], "shpat_x");
        assert_eq!(prepared.headers()["content-type"], "application/json");
        assert!(prepared.headers()["user-agent"]
            .to_str()
            .expect("ascii")
            .starts_with("shopify-rest-http/"));
        assert_eq!(
            prepared.body().and_then(|body| body.as_bytes()),
            Some(br#"{"id":1}"#.as_slice())
        );
    }

    #[test]
    fn caller_user_agent_replaces_default() {
        let request = Request::get("https://shop.example/").with_header("User-Agent", "custom/1");
        let connection = transport().connect(&request).expect("must prepare");

        let agents: Vec<_> = connection
            .request
            .headers()
            .get_all("user-agent")
            .iter()
            .collect();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0], "custom/1");
    }

    #[test]
    fn form_body_is_url_encoded() {
        let request = Request::post(
            "https://shop.example/form",
            Body::form([("title", "Red Hat"), ("qty", "2")]),
        );
        let connection = transport().connect(&request).expect("must prepare");

        assert_eq!(
            connection.request.headers()["content-type"],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            connection.request.body().and_then(|body| body.as_bytes()),
            Some(b"title=Red+Hat&qty=2".as_slice())
        );
    }

    #[test]
    fn invalid_url_is_an_invalid_request() {
        let err = transport()
            .connect(&Request::get("not a url"))
            .expect_err("must fail");
        assert!(matches!(err, ShopifyHttpError::InvalidRequest(_)));
    }

    #[test]
    fn invalid_header_name_is_an_invalid_request() {
        let request = Request::get("https://shop.example/").with_header("bad header", "v");
        let err = transport().connect(&request).expect_err("must fail");
        assert!(matches!(err, ShopifyHttpError::InvalidRequest(_)));
    }
}
