//! Conversion of extracted XML text into typed field values.

use crate::{CoercionError, FieldKind, FieldValue};

/// Converts raw element text into a value of the given kind.
///
/// - [`FieldKind::String`]: the text verbatim; never fails.
/// - [`FieldKind::Integer`]: a base-10 signed integer with an optional leading
///   sign. Surrounding whitespace is not accepted.
///
/// # Examples
///
/// ```
/// use exlibris_record::{FieldKind, FieldValue, coerce};
///
/// assert_eq!(coerce("1605", FieldKind::Integer), Ok(FieldValue::Integer(1605)));
/// assert_eq!(coerce(" 1605 ", FieldKind::String), Ok(FieldValue::String(" 1605 ".into())));
/// assert!(coerce("MDCV", FieldKind::Integer).is_err());
/// ```
pub fn coerce(text: &str, kind: FieldKind) -> Result<FieldValue, CoercionError> {
    match kind {
        FieldKind::String => Ok(FieldValue::String(text.to_string())),
        FieldKind::Integer => text
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|source| CoercionError::NotAnInteger {
                text: text.to_string(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        for text in ["", "Rima I", "  padded  ", "<not & xml>"] {
            assert_eq!(
                coerce(text, FieldKind::String),
                Ok(FieldValue::String(text.to_string()))
            );
        }
    }

    #[test]
    fn test_integer_parses_signed_values() {
        assert_eq!(coerce("1949", FieldKind::Integer), Ok(FieldValue::Integer(1949)));
        assert_eq!(coerce("-500", FieldKind::Integer), Ok(FieldValue::Integer(-500)));
        assert_eq!(coerce("+7", FieldKind::Integer), Ok(FieldValue::Integer(7)));
        assert_eq!(coerce("0", FieldKind::Integer), Ok(FieldValue::Integer(0)));
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        for text in ["", "abc", "19 49", " 1949", "1949 ", "12.5", "0x10"] {
            let err = coerce(text, FieldKind::Integer).unwrap_err();
            assert!(
                matches!(err, CoercionError::NotAnInteger { .. }),
                "unexpected error for {text:?}: {err}"
            );
        }
    }

    #[test]
    fn test_integer_rejects_overflow() {
        assert!(coerce("99999999999999999999", FieldKind::Integer).is_err());
    }
}
