mod splitter;

pub use splitter::split_pairs;

use crate::query_params::QueryParams;
use crate::unicode::percent_encode::{QueryContext, percent_decode_query};

/// Parse a raw query (the text after `?`, before `#`) into decoded pairs.
///
/// Never fails: an absent or empty query gives an empty map, and malformed
/// escapes are kept literally. Each key and value is decoded exactly once.
pub fn parse_query(query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    let Some(query) = query else {
        return params;
    };

    for (key, value) in split_pairs(query) {
        params.append(
            percent_decode_query(key, QueryContext::Key),
            percent_decode_query(value, QueryContext::Value),
        );
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(params: &QueryParams) -> Vec<(&str, &str)> {
        params.iter().collect()
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }

    #[test]
    fn test_parse_key_without_value() {
        assert_eq!(entries(&parse_query(Some("a"))), vec![("a", "")]);
        assert_eq!(entries(&parse_query(Some("a="))), vec![("a", "")]);
    }

    #[test]
    fn test_parse_separator_equivalence() {
        let amp = parse_query(Some("a=10&b=20"));
        let semi = parse_query(Some("a=10;b=20"));
        assert_eq!(amp, semi);
        assert_eq!(amp.len(), 2);
        assert_eq!(amp.get("a"), Some("10"));
    }

    #[test]
    fn test_parse_escaped_separators() {
        let params = parse_query(Some("a=10%26b=20"));
        assert_eq!(entries(&params), vec![("a", "10&b=20")]);

        let params = parse_query(Some("a=10%3Bb=20"));
        assert_eq!(entries(&params), vec![("a", "10;b=20")]);
    }

    #[test]
    fn test_parse_plus_as_space() {
        let params = parse_query(Some("a+b=c+d"));
        assert_eq!(entries(&params), vec![("a b", "c d")]);
    }

    #[test]
    fn test_parse_duplicates_in_order() {
        let params = parse_query(Some("a=1&b=2&a=3"));
        assert_eq!(entries(&params), vec![("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(params.get("a"), Some("1"));
    }

    #[test]
    fn test_parse_decodes_once() {
        let params = parse_query(Some("url=http%3A%2F%2Fbase.place%3Fa%3D%252F%252F"));
        assert_eq!(params.get("url"), Some("http://base.place?a=%2F%2F"));
    }
}
