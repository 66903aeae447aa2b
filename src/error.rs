/// Errors reported by URL construction and query serialization.
///
/// Query parsing never fails; malformed escapes are passed through literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Empty URL, or a URL containing characters that must be percent-encoded
    InvalidUrl,
    /// NaN or infinite float supplied as a query key or value
    NonFiniteFloat,
    /// Value rejected by a `QueryValue` implementation (carries the type name)
    UnsupportedValue(&'static str),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidUrl => f.write_str("Invalid URL"),
            Self::NonFiniteFloat => f.write_str("Non-finite float cannot be used in a query"),
            Self::UnsupportedValue(type_name) => {
                write!(f, "Unsupported query value of type `{type_name}`")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for URL and query operations
pub type Result<T> = core::result::Result<T, Error>;
