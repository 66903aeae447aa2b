use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::helpers::{find_search_start, is_encoded_url_text, prune_fragment};
use crate::parser::parse_query;
use crate::query_params::QueryParams;
use crate::query_value::{QueryValue, stringify_pairs};
use crate::serializer::{serialize_pairs, serialize_params};
use crate::url_components::UrlComponents;

/// Immutable URL with a percent-encoded query component.
///
/// The URL is stored as a single encoded buffer; the query and fragment are
/// located by offsets. The decoded [`QueryParams`] view is computed on first
/// access and cached by this instance only. Query operations never modify the
/// receiver, they build a new `Url`.
///
/// Equality and hashing compare the encoded string only.
///
/// # Examples
///
/// ```
/// use urlquery::Url;
///
/// let url: Url = "http://example.com/search?q=rust&page=1".parse().unwrap();
/// assert_eq!(url.query().get("q"), Some("rust"));
///
/// let next = url.update_query([("page", 2)]).unwrap();
/// assert_eq!(next.as_str(), "http://example.com/search?q=rust&page=2");
/// assert_eq!(url.query().get("page"), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct Url {
    buffer: String,
    components: UrlComponents,
    query: OnceLock<QueryParams>,
}

impl Url {
    /// Split an already-encoded URL string into base, query and fragment.
    ///
    /// Only the `?` and `#` delimiters are located; scheme, authority and path
    /// are kept verbatim in the base.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the input is empty or contains spaces
    /// or ASCII control characters.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() || !is_encoded_url_text(input) {
            return Err(Error::InvalidUrl);
        }

        let (without_hash, fragment) = prune_fragment(input);
        let components = UrlComponents {
            search_start: find_search_start(without_hash),
            hash_start: fragment.map(|_| without_hash.len()),
        };
        Ok(Self::from_buffer(input.to_string(), components))
    }

    /// Assemble a URL from an encoded base, an optional raw query (without
    /// `?`) and an optional fragment (without `#`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base is empty, if the base holds a
    /// `?` or `#`, if the query holds a `#`, or if any part is not encoded.
    pub fn from_parts(base: &str, query: Option<&str>, fragment: Option<&str>) -> Result<Self> {
        let base_ok = !base.is_empty()
            && is_encoded_url_text(base)
            && memchr::memchr2(b'?', b'#', base.as_bytes()).is_none();
        let query_ok = query.is_none_or(|q| is_encoded_url_text(q) && !q.contains('#'));
        let fragment_ok = fragment.is_none_or(is_encoded_url_text);

        if !(base_ok && query_ok && fragment_ok) {
            return Err(Error::InvalidUrl);
        }
        Ok(Self::assemble(base, query, fragment))
    }

    /// Create from buffer and components (internal use)
    fn from_buffer(buffer: String, components: UrlComponents) -> Self {
        Self {
            buffer,
            components,
            query: OnceLock::new(),
        }
    }

    /// Build `base[?query][#fragment]` without validation
    fn assemble(base: &str, query: Option<&str>, fragment: Option<&str>) -> Self {
        let capacity =
            base.len() + query.map_or(0, |q| q.len() + 1) + fragment.map_or(0, |f| f.len() + 1);
        let mut buffer = String::with_capacity(capacity);
        let mut components = UrlComponents::new();

        buffer.push_str(base);
        if let Some(query) = query {
            components.search_start = Some(buffer.len());
            buffer.push('?');
            buffer.push_str(query);
        }
        if let Some(fragment) = fragment {
            components.hash_start = Some(buffer.len());
            buffer.push('#');
            buffer.push_str(fragment);
        }
        Self::from_buffer(buffer, components)
    }

    /// Copy of this URL with the query replaced; the cached view is not carried over
    fn with_raw_query(&self, query: Option<&str>) -> Self {
        Self::assemble(self.base(), query, self.fragment())
    }

    /// Get the full URL string (zero-copy)
    pub fn href(&self) -> &str {
        &self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Everything before the query and fragment
    pub fn base(&self) -> &str {
        &self.buffer[..self.components.base_end(self.buffer.len())]
    }

    /// Get the encoded query without leading `?`.
    /// `None` when there is no `?`, `Some("")` for a lone `?`.
    pub fn raw_query(&self) -> Option<&str> {
        let range = self.components.search_range(self.buffer.len())?;
        self.buffer.get(range)
    }

    /// Get the fragment without leading `#`
    pub fn fragment(&self) -> Option<&str> {
        let range = self.components.hash_range(self.buffer.len())?;
        self.buffer.get(range)
    }

    /// Check if URL has a query component (possibly empty)
    pub fn has_query(&self) -> bool {
        self.components.search_start.is_some()
    }

    /// Decoded query parameters, parsed once on first access.
    pub fn query(&self) -> &QueryParams {
        self.query.get_or_init(|| parse_query(self.raw_query()))
    }

    /// Return a new URL whose query holds exactly `pairs`.
    ///
    /// The existing query is ignored. The result always has a query: an empty
    /// source gives a present but empty query (`...?`). Use
    /// [`without_query`](Self::without_query) to drop the query entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or value cannot be converted to text
    /// (see [`QueryValue`]).
    pub fn with_query<I, K, V>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: QueryValue,
        V: QueryValue,
    {
        let raw = serialize_pairs(pairs)?;
        tracing::trace!(url = %self.buffer, query = %raw, "replacing query");
        Ok(self.with_raw_query(Some(&raw)))
    }

    /// Infallible [`with_query`](Self::with_query) for already-decoded parameters.
    pub fn with_query_params(&self, params: &QueryParams) -> Self {
        self.with_raw_query(Some(&serialize_params(params)))
    }

    /// Return a new URL without a query component (no `?`).
    pub fn without_query(&self) -> Self {
        self.with_raw_query(None)
    }

    /// Return a new URL whose query is the current one updated with `pairs`.
    ///
    /// Pairs are applied in order. The first occurrence of a key in `pairs`
    /// replaces the first existing pair with that key and deletes the other
    /// existing pairs with that key (or is appended if the key is new). Further
    /// occurrences of the same key in `pairs` are appended.
    ///
    /// An empty source keeps the decoded pairs unchanged, but the query is
    /// re-encoded, so the string form may differ from the original. A URL
    /// without a query stays without one.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or value cannot be converted to text
    /// (see [`QueryValue`]).
    pub fn update_query<I, K, V>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: QueryValue,
        V: QueryValue,
    {
        let updates = stringify_pairs(pairs)?;
        if updates.is_empty() && !self.has_query() {
            return Ok(self.without_query());
        }

        let mut merged = self.query().clone();
        let mut seen = HashSet::with_capacity(updates.len());
        for (key, value) in updates {
            if seen.contains(&key) {
                merged.append(key, value);
            } else {
                seen.insert(key.clone());
                merged.set(key, value);
            }
        }

        tracing::trace!(url = %self.buffer, pairs = merged.len(), "updating query");
        Ok(self.with_query_params(&merged))
    }

    /// Return a new URL with `pairs` appended after the existing query pairs.
    ///
    /// Existing pairs are never overwritten. A URL without a query stays
    /// without one when `pairs` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or value cannot be converted to text
    /// (see [`QueryValue`]).
    pub fn extend_query<I, K, V>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: QueryValue,
        V: QueryValue,
    {
        let additions = stringify_pairs(pairs)?;
        if additions.is_empty() && !self.has_query() {
            return Ok(self.without_query());
        }

        let mut merged = self.query().clone();
        merged.extend(additions);

        tracing::trace!(url = %self.buffer, pairs = merged.len(), "extending query");
        Ok(self.with_query_params(&merged))
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buffer.hash(state);
    }
}

impl core::fmt::Display for Url {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.buffer)
    }
}

impl core::str::FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn url(input: &str) -> Url {
        Url::parse(input).unwrap()
    }

    #[test]
    fn test_parse_components() {
        let u = url("http://example.com/path?a=1&b=2#frag");
        assert_eq!(u.base(), "http://example.com/path");
        assert_eq!(u.raw_query(), Some("a=1&b=2"));
        assert_eq!(u.fragment(), Some("frag"));
        assert!(u.has_query());
    }

    #[test]
    fn test_parse_question_mark_in_fragment() {
        let u = url("http://example.com/path#frag?not=query");
        assert_eq!(u.raw_query(), None);
        assert_eq!(u.fragment(), Some("frag?not=query"));
        assert!(u.query().is_empty());
    }

    #[test]
    fn test_parse_empty_query_is_present() {
        let u = url("http://example.com/?");
        assert!(u.has_query());
        assert_eq!(u.raw_query(), Some(""));
        assert!(u.query().is_empty());
    }

    #[test]
    fn test_parse_rejects_unencoded() {
        assert_eq!(Url::parse(""), Err(Error::InvalidUrl));
        assert_eq!(Url::parse("http://a/?q=a b"), Err(Error::InvalidUrl));
        assert_eq!(Url::parse("http://a/\n"), Err(Error::InvalidUrl));
    }

    #[test]
    fn test_from_parts() {
        let u = Url::from_parts("http://a/p", Some("x=1"), Some("top")).unwrap();
        assert_eq!(u.as_str(), "http://a/p?x=1#top");
        assert_eq!(u, url("http://a/p?x=1#top"));

        let u = Url::from_parts("http://a/p", None, None).unwrap();
        assert_eq!(u.as_str(), "http://a/p");
        assert!(!u.has_query());
    }

    #[test]
    fn test_from_parts_rejects_delimiters() {
        assert_eq!(Url::from_parts("http://a/?x", None, None), Err(Error::InvalidUrl));
        assert_eq!(
            Url::from_parts("http://a/", Some("x#y"), None),
            Err(Error::InvalidUrl)
        );
        assert_eq!(Url::from_parts("", Some("x"), None), Err(Error::InvalidUrl));
    }

    #[test]
    fn test_query_is_cached() {
        let u = url("http://a/?x=1");
        let first: *const QueryParams = u.query();
        let second: *const QueryParams = u.query();
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_query_keeps_fragment() {
        let u = url("http://a/p?old=1#frag");
        let updated = u.with_query([("new", "2")]).unwrap();
        assert_eq!(updated.as_str(), "http://a/p?new=2#frag");
        assert_eq!(u.as_str(), "http://a/p?old=1#frag");
    }

    #[test]
    fn test_with_query_empty_is_present() {
        let u = url("http://a/p?old=1");
        let updated = u.with_query(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(updated.as_str(), "http://a/p?");
        assert!(updated.has_query());
        assert!(updated.query().is_empty());
    }

    #[test]
    fn test_without_query() {
        let u = url("http://a/p?old=1#frag");
        assert_eq!(u.without_query().as_str(), "http://a/p#frag");
    }

    #[test]
    fn test_update_query_first_source_key_sets() {
        let u = url("http://a/?a=1&b=2&a=3");
        let updated = u.update_query([("a", "x"), ("c", "y"), ("a", "z")]).unwrap();
        let pairs: Vec<(&str, &str)> = updated.query().iter().collect();
        assert_eq!(pairs, vec![("a", "x"), ("b", "2"), ("c", "y"), ("a", "z")]);
    }

    #[test]
    fn test_update_query_empty_without_query() {
        let u = url("http://a/p");
        let updated = u.update_query(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(updated.as_str(), "http://a/p");
    }

    #[test]
    fn test_extend_query_appends() {
        let u = url("http://a/?a=1");
        let updated = u.extend_query([("a", 2), ("b", 3)]).unwrap();
        assert_eq!(updated.as_str(), "http://a/?a=1&a=2&b=3");
    }

    #[test]
    fn test_update_query_rejects_nan() {
        let u = url("http://a/?a=1");
        assert_eq!(u.update_query([("a", f32::NAN)]), Err(Error::NonFiniteFloat));
    }

    #[test]
    fn test_equality_is_string_equality() {
        let a = url("http://a/?x=1");
        let b = url("http://a/?x=1");
        let _ = a.query();
        assert_eq!(a, b);
        assert_ne!(url("http://a/?x=1"), url("http://a/?x=%31"));
        assert_ne!(url("http://a/"), url("http://a/?"));
    }
}
