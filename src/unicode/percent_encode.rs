use memchr::memchr2;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

// Encode sets for the query component.
// Everything outside the set is left literal; `AsciiSet` lists the bytes that get encoded.

/// Query value percent-encode set
/// Non-alphanumeric, minus unreserved `-._~`, sub-delims `!$'()*,` and `/?:@`
/// Note: `&`, `;`, `=`, `+`, `%` and space are always encoded
pub const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@');

/// Query key percent-encode set
/// Same as `QUERY_VALUE_SET`: `=` is already encoded there
pub const QUERY_KEY_SET: &AsciiSet = QUERY_VALUE_SET;

/// Position of a string inside a query pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryContext {
    Key,
    Value,
}

impl QueryContext {
    /// Get the encode set for this context
    pub fn encode_set(self) -> &'static AsciiSet {
        match self {
            Self::Key => QUERY_KEY_SET,
            Self::Value => QUERY_VALUE_SET,
        }
    }
}

/// Percent-encode a query key or value.
///
/// Characters are encoded through their UTF-8 bytes, so a non-BMP character
/// becomes four `%XX` escapes. A space is encoded as `%20`, never as `+`.
///
/// # Examples
///
/// ```
/// use urlquery::{QueryContext, percent_encode_query};
///
/// assert_eq!(percent_encode_query("a b&c", QueryContext::Value), "a%20b%26c");
/// assert_eq!(percent_encode_query("/path?x:y@z", QueryContext::Value), "/path?x:y@z");
/// ```
pub fn percent_encode_query(input: &str, context: QueryContext) -> String {
    let mut buffer = String::with_capacity(input.len());
    percent_encode_query_into(&mut buffer, input, context);
    buffer
}

/// Write percent-encoded query key or value directly to buffer
pub fn percent_encode_query_into(buffer: &mut String, input: &str, context: QueryContext) {
    buffer.reserve(input.len());

    for chunk in utf8_percent_encode(input, context.encode_set()) {
        buffer.push_str(chunk);
    }
}

/// Decode a percent-encoded query key or value.
///
/// Consecutive escapes are grouped and read as UTF-8. Malformed escapes and
/// escaped bytes that are not valid UTF-8 are kept as they appear in `input`.
/// The result is never decoded a second time. A literal `+` is a space in
/// both contexts.
///
/// # Examples
///
/// ```
/// use urlquery::{QueryContext, percent_decode_query};
///
/// assert_eq!(percent_decode_query("c+d", QueryContext::Value), "c d");
/// assert_eq!(percent_decode_query("%F0%9D%95%A6", QueryContext::Value), "𝕦");
/// assert_eq!(percent_decode_query("100%", QueryContext::Value), "100%");
/// ```
pub fn percent_decode_query(input: &str, _context: QueryContext) -> Cow<'_, str> {
    let bytes = input.as_bytes();

    // Fast path: nothing to decode
    if memchr2(b'%', b'+', bytes).is_none() {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut run = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memchr2(b'%', b'+', &bytes[pos..]) {
        let at = pos + offset;
        result.push_str(&input[pos..at]);

        if bytes[at] == b'+' {
            result.push(' ');
            pos = at + 1;
            continue;
        }

        run.clear();
        let mut end = at;
        while let Some(byte) = escaped_byte(bytes, end) {
            run.push(byte);
            end += 3;
        }

        if run.is_empty() {
            // Not followed by two hex digits
            result.push('%');
            pos = at + 1;
        } else {
            push_utf8_run(&mut result, &run, &input[at..end]);
            pos = end;
        }
    }

    result.push_str(&input[pos..]);
    Cow::Owned(result)
}

/// Read the byte of a `%XX` escape starting at `at`
fn escaped_byte(bytes: &[u8], at: usize) -> Option<u8> {
    if bytes.get(at) != Some(&b'%') {
        return None;
    }
    let high = hex_value(*bytes.get(at + 1)?)?;
    let low = hex_value(*bytes.get(at + 2)?)?;
    Some((high << 4) | low)
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Append a run of decoded bytes as UTF-8.
/// `raw` is the escaped source of the run, three characters per byte.
fn push_utf8_run(result: &mut String, run: &[u8], raw: &str) {
    let mut consumed = 0;
    for chunk in run.utf8_chunks() {
        result.push_str(chunk.valid());
        consumed += chunk.valid().len();

        for _ in chunk.invalid() {
            let start = consumed * 3;
            result.push_str(&raw[start..start + 3]);
            consumed += 1;
        }
    }
}
