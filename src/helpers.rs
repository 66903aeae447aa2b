use crate::character_sets::is_forbidden_url_char;

/// Check that a URL piece is already encoded (no controls, no spaces)
pub fn is_encoded_url_text(input: &str) -> bool {
    !input.bytes().any(is_forbidden_url_char)
}

/// Prune fragment (#hash) from URL string
/// Returns (`url_without_fragment`, `fragment_without_hash`)
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Find the `?` that starts the query of a fragment-free URL string
pub fn find_search_start(input: &str) -> Option<usize> {
    memchr::memchr(b'?', input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_fragment() {
        assert_eq!(
            prune_fragment("http://a/b?c=1#frag#more"),
            ("http://a/b?c=1", Some("frag#more"))
        );
        assert_eq!(prune_fragment("http://a/b#"), ("http://a/b", Some("")));
        assert_eq!(prune_fragment("http://a/b"), ("http://a/b", None));
    }

    #[test]
    fn test_find_search_start() {
        assert_eq!(find_search_start("http://a/b?c=1?d"), Some(10));
        assert_eq!(find_search_start("http://a/b"), None);
    }

    #[test]
    fn test_is_encoded_url_text() {
        assert!(is_encoded_url_text("http://a/%20b?c=d"));
        assert!(!is_encoded_url_text("http://a/ b"));
        assert!(!is_encoded_url_text("http://a/\tb"));
    }
}
