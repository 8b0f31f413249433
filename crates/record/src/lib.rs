//! # Ex Libris Record Model
//!
//! This crate provides the types shared by the write path (records to XML) and
//! the read path (XML fragments back to records) of Ex Libris.
//!
//! ## Overview
//!
//! - [`Record`]: implemented by every application type that is stored as XML.
//!   It exposes an ordered, compile-time table of [`FieldDescriptor`]s together
//!   with value access and assignment by field name.
//! - [`FieldKind`] / [`FieldValue`]: the two primitive kinds the engine supports,
//!   `String` and `Integer`. Fields of any other type are not part of a record's
//!   descriptor table.
//! - [`coerce`]: converts extracted text into a [`FieldValue`] of a given kind.
//!
//! ## Deriving
//!
//! With the default `derive` feature, `#[derive(Record)]` generates the
//! implementation:
//!
//! ```
//! use exlibris_record::{FieldKind, FieldValue, Record};
//!
//! #[derive(Debug, Default, Record)]
//! #[record(rename_all = "camelCase")]
//! struct Book {
//!     title: Option<String>,
//!     author: Option<String>,
//!     publish_year: i32,
//! }
//!
//! let names: Vec<_> = Book::fields().iter().map(|f| f.name).collect();
//! assert_eq!(names, ["title", "author", "publishYear"]);
//! assert_eq!(Book::fields()[2].kind, FieldKind::Integer);
//! assert_eq!(Book::element_name(), "book");
//!
//! let book = Book { publish_year: 1605, ..Default::default() };
//! assert_eq!(book.value_of("publishYear"), Some(FieldValue::Integer(1605)));
//! assert_eq!(book.value_of("title"), None);
//! ```
//!
//! ### Attributes
//!
//! | Attribute | Position | Effect |
//! |-----------|----------|--------|
//! | `#[record(rename = "Libro")]` | type | overrides [`Record::TYPE_NAME`] |
//! | `#[record(rename_all = "camelCase")]` | type | converts every field name (`camelCase`, `PascalCase`, `snake_case`, `kebab-case`, `SCREAMING_SNAKE_CASE`, `lowercase`, `UPPERCASE`) |
//! | `#[record(rename = "publishYear")]` | field | explicit XML tag / field name |
//! | `#[record(skip)]` | field | leaves the field out of the descriptor table |

// Lets the derive's `::exlibris_record` paths resolve inside this crate's own tests.
extern crate self as exlibris_record;

pub mod coerce;
pub mod descriptor;
pub mod error;
pub mod record;
pub mod value;

pub use coerce::coerce;
pub use descriptor::{FieldDescriptor, FieldKind};
pub use error::{CoercionError, InstantiationError};
pub use record::{Record, describe};
pub use value::FieldValue;

#[cfg(feature = "derive")]
pub use exlibris_record_macro::Record;

/// Support functions called from `#[derive(Record)]` output. Not a public API.
#[doc(hidden)]
pub mod __private {
    use crate::{CoercionError, FieldKind, FieldValue};

    /// Converts any primitive integer into an integer field value.
    pub fn integer_value<T>(field: &'static str, value: T) -> Result<FieldValue, CoercionError>
    where
        T: TryInto<i64> + Copy + std::fmt::Display,
    {
        value
            .try_into()
            .map(FieldValue::Integer)
            .map_err(|_| CoercionError::Unrepresentable {
                field,
                value: value.to_string(),
            })
    }

    /// Unwraps a string field value.
    pub fn into_string(field: &'static str, value: FieldValue) -> Result<String, CoercionError> {
        match value {
            FieldValue::String(s) => Ok(s),
            other => Err(CoercionError::KindMismatch {
                field,
                expected: FieldKind::String,
                found: other.kind(),
            }),
        }
    }

    /// Unwraps an integer field value and narrows it to the field's type.
    pub fn into_integer<T>(field: &'static str, value: FieldValue) -> Result<T, CoercionError>
    where
        T: TryFrom<i64>,
    {
        match value {
            FieldValue::Integer(n) => {
                T::try_from(n).map_err(|_| CoercionError::OutOfRange { field, value: n })
            }
            other => Err(CoercionError::KindMismatch {
                field,
                expected: FieldKind::Integer,
                found: other.kind(),
            }),
        }
    }

    /// Error for a field name the record does not declare.
    pub fn unknown_field(field: &str) -> CoercionError {
        CoercionError::UnknownField {
            field: field.to_string(),
        }
    }
}
