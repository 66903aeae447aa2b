use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::parser::parse_query;
use crate::serializer::serialize_params;

/// Decoded query parameters.
///
/// An ordered sequence of key-value pairs in which keys may repeat. Lookups by
/// key return the first matching pair; iteration yields every pair in order.
/// Two `QueryParams` are equal when their pair sequences are identical.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
    /// Positions of each key in `params`, ascending
    index: HashMap<String, Vec<usize>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a raw query string, the text after the URL's `?`.
    ///
    /// A leading `?` is part of the first key.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlquery::QueryParams;
    ///
    /// let params = QueryParams::parse("a=1;b=hello+world&a=3");
    /// assert_eq!(params.get("a"), Some("1"));
    /// assert_eq!(params.get_all("a"), vec!["1", "3"]);
    /// assert_eq!(params.get("b"), Some("hello world"));
    /// ```
    pub fn parse(query: &str) -> Self {
        parse_query(Some(query))
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.index
            .entry(key.clone())
            .or_default()
            .push(self.params.len());
        self.params.push((key, value.into()));
    }

    /// Set the first pair with the given key to `value` and delete the other
    /// pairs with that key. Appends a new pair if the key is missing.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let Some(&first) = self.index.get(&key).and_then(|positions| positions.first()) else {
            self.append(key, value);
            return;
        };
        let duplicated = self.index.get(&key).is_some_and(|positions| positions.len() > 1);

        self.params[first].1 = value.into();
        if duplicated {
            let mut position = 0;
            self.params.retain(|(k, _)| {
                let keep = *k != key || position == first;
                position += 1;
                keep
            });
            self.reindex();
        }
    }

    /// Delete pairs with the given key.
    /// If `value` is provided, only deletes pairs matching both key and value.
    /// Otherwise, deletes all pairs with the given key.
    pub fn delete(&mut self, key: &str, value: Option<&str>) {
        let before = self.params.len();
        if let Some(val) = value {
            self.params.retain(|(k, v)| k != key || v != val);
        } else {
            self.params.retain(|(k, _)| k != key);
        }
        if self.params.len() != before {
            self.reindex();
        }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let first = *self.index.get(key)?.first()?;
        self.params.get(first).map(|(_, v)| v.as_str())
    }

    /// Get all values for a key, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.index.get(key).map_or_else(Vec::new, |positions| {
            positions
                .iter()
                .filter_map(|&position| self.params.get(position))
                .map(|(_, v)| v.as_str())
                .collect()
        })
    }

    /// Check if a key exists.
    /// If `value` is provided, checks for a specific key-value pair.
    pub fn has(&self, key: &str, value: Option<&str>) -> bool {
        let Some(positions) = self.index.get(key) else {
            return false;
        };
        match value {
            Some(val) => positions
                .iter()
                .filter_map(|&position| self.params.get(position))
                .any(|(_, v)| v == val),
            None => true,
        }
    }

    /// Number of pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.params.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, v)| v.as_str())
    }

    /// Percent-encoded query string without leading `?`.
    /// Pairs are joined with `&`; an empty map gives an empty string.
    pub fn to_query_string(&self) -> String {
        serialize_params(self)
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (position, (key, _)) in self.params.iter().enumerate() {
            self.index.entry(key.clone()).or_default().push(position);
        }
    }
}

impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Eq for QueryParams {}

impl Hash for QueryParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.params.hash(state);
    }
}

impl core::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl From<&str> for QueryParams {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for QueryParams {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

/// Iterator over the pairs of a [`QueryParams`], in order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}
