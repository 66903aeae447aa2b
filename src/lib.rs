//! Codec for the query component of URLs and an immutable URL value.
//!
//! Raw queries are split on `&` and `;`, decoded once into ordered,
//! duplicate-preserving [`QueryParams`], and serialized back with `&` and
//! uppercase percent-escapes. [`Url`] exposes the decoded view and builds new
//! URLs with [`Url::with_query`], [`Url::update_query`] and
//! [`Url::extend_query`].

// Internal modules (not public API)
mod character_sets;
mod error;
mod helpers;
mod parser;
mod query_params;
mod query_value;
#[cfg(feature = "serde")]
mod serde_impls;
mod serializer;
mod unicode;
mod url;
mod url_components;

// Public API
pub use error::{Error, Result};
pub use parser::{parse_query, split_pairs};
pub use query_params::{Iter, QueryParams};
pub use query_value::QueryValue;
pub use serializer::{serialize_pairs, serialize_params};
pub use unicode::percent_encode::{
    QUERY_KEY_SET, QUERY_VALUE_SET, QueryContext, percent_decode_query, percent_encode_query,
    percent_encode_query_into,
};
pub use self::url::Url;
