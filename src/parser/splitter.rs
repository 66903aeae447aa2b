use crate::character_sets::is_pair_separator;

/// Split a raw query into `(raw_key, raw_value)` pairs.
///
/// Pairs are separated by `&` or `;`. Empty pairs are skipped, and a pair
/// without `=` has an empty value. Only the first `=` splits key from value.
pub fn split_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split(|c: char| c.is_ascii() && is_pair_separator(c as u8))
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}
