/// Request payload for `POST` and `PUT`.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Sent as-is without a content type.
    Text(String),
    Bytes(Vec<u8>),
    /// Serialized with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Encoded as `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

impl Body {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Serializes any `Serialize` value into a JSON body.
    pub fn to_json<T: serde::Serialize>(value: &T) -> crate::Result<Self> {
        serde_json::to_value(value).map(Self::Json).map_err(|err| {
            crate::ShopifyHttpError::InvalidRequest(format!("invalid JSON body: {err}"))
        })
    }

    pub fn form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}
