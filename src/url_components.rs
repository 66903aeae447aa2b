use core::ops::Range;

/// Query and fragment offsets inside a URL buffer
///
/// Buffer layout: "<https://example.com/path?query#hash>"
/// - `search_start`: Some(24) (position of "?")
/// - `hash_start`: Some(30) (position of "#")
///
/// `None` means the delimiter is absent. A present delimiter may be followed
/// by an empty component ("...?" or "...#").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlComponents {
    pub search_start: Option<usize>,
    pub hash_start: Option<usize>,
}

impl UrlComponents {
    /// Create a new `UrlComponents` with no query and no fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// End of the part before the query and fragment
    pub fn base_end(&self, buffer_len: usize) -> usize {
        self.search_start.or(self.hash_start).unwrap_or(buffer_len)
    }

    /// Range of the query without its leading "?"
    pub fn search_range(&self, buffer_len: usize) -> Option<Range<usize>> {
        let start = self.search_start? + 1;
        Some(start..self.hash_start.unwrap_or(buffer_len))
    }

    /// Range of the fragment without its leading "#"
    pub fn hash_range(&self, buffer_len: usize) -> Option<Range<usize>> {
        Some(self.hash_start? + 1..buffer_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_components_new() {
        let components = UrlComponents::new();
        assert_eq!(components.search_start, None);
        assert_eq!(components.hash_start, None);
        assert_eq!(components.base_end(10), 10);
        assert_eq!(components.search_range(10), None);
    }

    #[test]
    fn test_ranges_with_query_and_hash() {
        // "http://a/p?q=1#h"
        let components = UrlComponents {
            search_start: Some(10),
            hash_start: Some(14),
        };
        assert_eq!(components.base_end(16), 10);
        assert_eq!(components.search_range(16), Some(11..14));
        assert_eq!(components.hash_range(16), Some(15..16));
    }

    #[test]
    fn test_ranges_with_hash_only() {
        // "http://a/p#h"
        let components = UrlComponents {
            search_start: None,
            hash_start: Some(10),
        };
        assert_eq!(components.base_end(12), 10);
        assert_eq!(components.search_range(12), None);
    }

    #[test]
    fn test_empty_query() {
        // "http://a/p?"
        let components = UrlComponents {
            search_start: Some(10),
            hash_start: None,
        };
        assert_eq!(components.search_range(11), Some(11..11));
    }
}
