use std::borrow::Cow;

use crate::error::{Error, Result};

/// Conversion of a query key or value into text before percent-encoding.
///
/// Implemented for:
/// - `str`, `String`, `Cow<str>` and `char`, used as-is
/// - all primitive integers, in decimal
/// - `f32` and `f64`, in their `Display` form; NaN and infinities fail with
///   [`Error::NonFiniteFloat`]
/// - references to any implementor
///
/// `bool` is deliberately not implemented. Implement this trait for your own
/// types to pass them to [`Url::with_query`](crate::Url::with_query) and friends;
/// return [`Error::UnsupportedValue`] to reject a value.
pub trait QueryValue {
    /// Text form of the value
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no query representation.
    fn to_query_value(&self) -> Result<Cow<'_, str>>;
}

impl QueryValue for str {
    fn to_query_value(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl QueryValue for Cow<'_, str> {
    fn to_query_value(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl QueryValue for char {
    fn to_query_value(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Owned(self.to_string()))
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Result<Cow<'_, str>> {
        (**self).to_query_value()
    }
}

macro_rules! impl_query_value_for_integer {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Result<Cow<'_, str>> {
                    Ok(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

impl_query_value_for_integer!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

macro_rules! impl_query_value_for_float {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Result<Cow<'_, str>> {
                    if self.is_finite() {
                        Ok(Cow::Owned(self.to_string()))
                    } else {
                        tracing::debug!(value = %self, "rejecting non-finite float in query");
                        Err(Error::NonFiniteFloat)
                    }
                }
            }
        )*
    };
}

impl_query_value_for_float!(f32, f64);

/// Convert caller-supplied pairs to owned text, preserving order and duplicates.
pub(crate) fn stringify_pairs<I, K, V>(pairs: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = (K, V)>,
    K: QueryValue,
    V: QueryValue,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            Ok((
                key.to_query_value()?.into_owned(),
                value.to_query_value()?.into_owned(),
            ))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_values() {
        assert_eq!("abc".to_query_value().unwrap(), "abc");
        assert_eq!(String::from("x y").to_query_value().unwrap(), "x y");
        assert_eq!('é'.to_query_value().unwrap(), "é");
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(42u8.to_query_value().unwrap(), "42");
        assert_eq!((-7i64).to_query_value().unwrap(), "-7");
        assert_eq!(1.5f64.to_query_value().unwrap(), "1.5");
        assert_eq!(2.0f32.to_query_value().unwrap(), "2");
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        assert_eq!(f64::NAN.to_query_value(), Err(Error::NonFiniteFloat));
        assert_eq!(f32::INFINITY.to_query_value(), Err(Error::NonFiniteFloat));
    }

    #[test]
    fn test_stringify_pairs_keeps_order_and_duplicates() {
        let pairs = stringify_pairs(vec![("a", 1), ("b", 2), ("a", 3)]).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_stringify_pairs_fails_on_first_bad_value() {
        let result = stringify_pairs([("a", 1.0), ("b", f64::NEG_INFINITY)]);
        assert_eq!(result, Err(Error::NonFiniteFloat));
    }
}
