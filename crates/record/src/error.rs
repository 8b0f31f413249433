//! Error types for coercion and record construction.

use std::num::ParseIntError;

use thiserror::Error;

use crate::FieldKind;

/// A field value could not be converted to, or stored as, its declared kind.
///
/// Coercion errors are never fatal for a record: the mapper leaves the field at
/// its default value and reports the error as a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The text is empty or not a base-10 integer.
    #[error("'{text}' is not an integer: {source}")]
    NotAnInteger {
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// The integer does not fit the field's Rust type.
    #[error("{value} is out of range for field '{field}'")]
    OutOfRange { field: &'static str, value: i64 },

    /// The field holds an integer that does not fit in an `i64`, so it has no
    /// XML representation.
    #[error("{value} in field '{field}' does not fit a 64-bit signed integer")]
    Unrepresentable { field: &'static str, value: String },

    /// A value of the wrong kind was assigned to a field.
    #[error("field '{field}' expects a value of kind {expected}, got {found}")]
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
        found: FieldKind,
    },

    /// The record declares no field with this name.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
}

/// The zero-valued instance of a record type could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot instantiate {type_name}: {reason}")]
pub struct InstantiationError {
    pub type_name: &'static str,
    pub reason: String,
}

impl InstantiationError {
    /// Creates a new instantiation error.
    pub fn new(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            type_name,
            reason: reason.into(),
        }
    }
}
