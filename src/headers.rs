use std::collections::BTreeMap;

/// Request header mapping.
///
/// Names are unique; inserting an existing name replaces its value. Name
/// comparison is case-insensitive, matching HTTP semantics, while the
/// spelling of the first insertion is kept for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, (String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds headers from name/value pairs. Later pairs win on duplicates.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name, value);
        }
        headers
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        let value = value.into();
        match self.0.get_mut(&key) {
            Some(entry) => entry.1 = value,
            None => {
                self.0.insert(key, (name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, value)` pairs in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns `self` with every header of `overrides` applied on top.
    pub fn merged(mut self, overrides: &Headers) -> Self {
        for (name, value) in overrides.iter() {
            self.insert(name, value);
        }
        self
    }
}

impl From<()> for Headers {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Headers {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<BTreeMap<String, String>> for Headers {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<std::collections::HashMap<String, String>> for Headers {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}
