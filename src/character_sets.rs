/// Query byte classification for pair splitting
/// Returns: 0=pair content, 1=pair separator
const QUERY_SEPARATOR_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];

    // Both separators are accepted interchangeably
    table[b'&' as usize] = 1;
    table[b';' as usize] = 1;

    table
};

/// Check if a byte separates key-value pairs in a query (`&` or `;`)
pub fn is_pair_separator(b: u8) -> bool {
    QUERY_SEPARATOR_TABLE[b as usize] == 1
}

/// Check if a character is an ASCII control character or space.
/// None of these may appear unescaped in an encoded URL.
pub fn is_forbidden_url_char(b: u8) -> bool {
    b <= 0x20 || b == 0x7F
}
