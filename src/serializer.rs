use crate::error::Result;
use crate::query_params::QueryParams;
use crate::query_value::{QueryValue, stringify_pairs};
use crate::unicode::percent_encode::{QueryContext, percent_encode_query_into};

/// Serialize decoded parameters into a raw query string (no leading `?`).
pub fn serialize_params(params: &QueryParams) -> String {
    write_pairs(params.iter())
}

/// Serialize caller-supplied pairs into a raw query string (no leading `?`).
///
/// Keys and values are converted with [`QueryValue`] and percent-encoded.
/// Pairs keep the iteration order of `pairs`, duplicates included. An empty
/// source gives an empty string.
///
/// # Errors
///
/// Returns an error if a key or value cannot be converted to text.
///
/// # Examples
///
/// ```
/// use urlquery::serialize_pairs;
///
/// let query = serialize_pairs([("q", "rust lang"), ("page", "2")]).unwrap();
/// assert_eq!(query, "q=rust%20lang&page=2");
///
/// let query = serialize_pairs([("n", 10), ("n", 20)]).unwrap();
/// assert_eq!(query, "n=10&n=20");
/// ```
pub fn serialize_pairs<I, K, V>(pairs: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: QueryValue,
    V: QueryValue,
{
    let pairs = stringify_pairs(pairs)?;
    Ok(write_pairs(
        pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    ))
}

fn write_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut result = String::new();
    for (i, (key, value)) in pairs.enumerate() {
        if i > 0 {
            result.push('&');
        }
        percent_encode_query_into(&mut result, key, QueryContext::Key);
        result.push('=');
        percent_encode_query_into(&mut result, value, QueryContext::Value);
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize_params(&QueryParams::new()), "");
        assert_eq!(serialize_pairs(Vec::<(&str, &str)>::new()).unwrap(), "");
    }

    #[test]
    fn test_serialize_uses_ampersand_only() {
        let params = QueryParams::parse("a=10;b=20");
        assert_eq!(serialize_params(&params), "a=10&b=20");
    }

    #[test]
    fn test_serialize_escapes_separators_in_values() {
        let query = serialize_pairs([("c", "10&b=20"), ("d", "10;b=20")]).unwrap();
        assert_eq!(query, "c=10%26b%3D20&d=10%3Bb%3D20");
    }

    #[test]
    fn test_serialize_empty_value_keeps_equals() {
        let params = QueryParams::parse("a");
        assert_eq!(serialize_params(&params), "a=");
    }

    #[test]
    fn test_serialize_space_and_plus() {
        let query = serialize_pairs([("a b", "1+1 2")]).unwrap();
        assert_eq!(query, "a%20b=1%2B1%202");
    }

    #[test]
    fn test_serialize_non_bmp() {
        let query = serialize_pairs([("foo", "𝕦𝕟𝕚")]).unwrap();
        assert_eq!(query, "foo=%F0%9D%95%A6%F0%9D%95%9F%F0%9D%95%9A");
    }

    #[test]
    fn test_serialize_encoded_url_value() {
        let query = serialize_pairs([("bar", "http://example.com/?foo=%F0%9D")]).unwrap();
        assert_eq!(query, "bar=http://example.com/?foo%3D%25F0%259D");
    }

    #[test]
    fn test_serialize_numbers() {
        let query = serialize_pairs([("a", 1u32), ("b", 20u32)]).unwrap();
        assert_eq!(query, "a=1&b=20");
    }

    #[test]
    fn test_serialize_rejects_non_finite() {
        assert_eq!(serialize_pairs([("x", f64::NAN)]), Err(Error::NonFiniteFloat));
    }

    #[test]
    fn test_reparse_is_stable() {
        let original = QueryParams::parse("a+b=c+d;e=%zz&f=%F0%9D%95%A6&&g");
        let reparsed = QueryParams::parse(&serialize_params(&original));
        assert_eq!(reparsed, original);
    }
}
