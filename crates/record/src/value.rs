//! Typed field values.

use std::borrow::Cow;
use std::fmt;

use crate::FieldKind;

/// The value of one record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Text value.
    String(String),
    /// Integer value, widened to `i64`.
    Integer(i64),
}

impl FieldValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Integer(_) => FieldKind::Integer,
        }
    }

    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::String(_) => None,
        }
    }

    /// Returns the text written into the field's XML element.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::String(s) => Cow::Borrowed(s),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(FieldValue::from("Altazor").to_text(), "Altazor");
        assert_eq!(FieldValue::from(-500).to_text(), "-500");
    }

    #[test]
    fn test_accessors() {
        let value = FieldValue::from(1949);
        assert_eq!(value.kind(), FieldKind::Integer);
        assert_eq!(value.as_integer(), Some(1949));
        assert_eq!(value.as_str(), None);

        let value = FieldValue::from("1984".to_string());
        assert_eq!(value.kind(), FieldKind::String);
        assert_eq!(value.as_str(), Some("1984"));
        assert_eq!(value.as_integer(), None);
    }
}
