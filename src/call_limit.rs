use std::str::FromStr;

use reqwest::header::HeaderMap;

/// Header reporting leaky-bucket usage as `"<used>/<limit>"`.
pub const CALL_LIMIT_HEADER: &str = "X-Shopify-Shop-Api-Call-Limit";

/// Leaky-bucket state reported by Shopify on every REST response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallLimit {
    pub used: u32,
    pub limit: u32,
}

impl CallLimit {
    /// Reads and parses the call-limit header.
    ///
    /// Returns `None` when the header is absent, not valid UTF-8, or not of
    /// the `used/limit` form.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(CALL_LIMIT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    /// `true` while the bucket still has room for another call.
    pub fn has_capacity(&self) -> bool {
        self.used < self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

/// Error returned when a call-limit value is not `"<used>/<limit>"`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid call limit value '{0}'")]
pub struct ParseCallLimitError(String);

impl FromStr for CallLimit {
    type Err = ParseCallLimitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCallLimitError(value.to_owned());
        let (used, limit) = value.split_once('/').ok_or_else(invalid)?;
        Ok(Self {
            used: used.trim().parse().map_err(|_| invalid())?,
            limit: limit.trim().parse().map_err(|_| invalid())?,
        })
    }
}
