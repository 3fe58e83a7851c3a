//! `shopify-rest-http` is the async HTTP transport layer of a Shopify Admin
//! REST API client.
//!
//! It issues `GET`/`POST`/`PUT`/`DELETE` requests and applies two retry
//! policies:
//! - `429` responses are retried every 500 ms while the
//!   `X-Shopify-Shop-Api-Call-Limit` bucket is full, and fail fast with
//!   [`ShopifyHttpError::RateLimitExceeded`] when the bucket still has room;
//! - `5xx` responses are retried up to 30 times, 10 s apart.
//!
//! Entry points:
//! - [`ShopifyHttpClient`] for the four verbs
//! - [`RequestExecutor`] to run the retry loop over a custom [`Transport`]

mod body;
mod call_limit;
mod client;
mod error;
mod executor;
mod headers;
mod options;
pub mod transport;
mod types;

pub use body::Body;
pub use call_limit::{CallLimit, ParseCallLimitError, CALL_LIMIT_HEADER};
pub use client::{ShopifyHttpClient, ACCESS_TOKEN_HEADER};
pub use error::{ShopifyHttpError, TransportErrorKind};
pub use executor::RequestExecutor;
pub use headers::Headers;
pub use options::ClientOptions;
pub use transport::{Connection, ReqwestTransport, Transport};
pub use types::{Method, Request, Response};

pub type Result<T> = std::result::Result<T, ShopifyHttpError>;
