use std::fmt;

use crate::CallLimit;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ShopifyHttpError {
    /// Low-level network failure. Never retried.
    #[error("transport error ({kind}): {message}")]
    Transport {
        /// Coarse classification of the underlying failure.
        kind: TransportErrorKind,
        /// Message text from the transport.
        message: String,
    },
    /// `429` while the call-limit header still reported spare capacity.
    #[error("rate limit exceeded: {body}")]
    RateLimitExceeded {
        /// Parsed `X-Shopify-Shop-Api-Call-Limit` value of the rejected response.
        call_limit: Option<CallLimit>,
        /// Response body returned with the `429`, decoded as lossy UTF-8.
        body: String,
    },
    /// The request could not be turned into a transport request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Response body decoding error.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Classification of a [`ShopifyHttpError::Transport`] failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportErrorKind {
    /// Connection could not be established (refused, DNS, TLS).
    Connect,
    /// The per-attempt timeout elapsed.
    Timeout,
    /// The request failed while being sent.
    Request,
    /// The response body could not be read.
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

impl ShopifyHttpError {
    pub(crate) fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ShopifyHttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::InvalidRequest(err.to_string());
        }
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::transport(kind, err.to_string())
    }
}
