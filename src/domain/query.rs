/// Ordered query mapping passed to the gateway.
///
/// Keys are unique and keep their first insertion position. A value of `None` is kept in the
/// mapping but omitted from the encoded query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, Option<String>)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing entry in place or appending a new one.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`Query::set`] for a present value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// `None` if the key is missing, `Some(None)` if it is present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    pub fn entries(&self) -> &[(String, Option<String>)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.set(key, Some(value.into()));
        }
        query
    }
}
