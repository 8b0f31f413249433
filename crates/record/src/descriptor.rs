//! Field descriptors: the (name, kind) metadata that drives both
//! serialization and extraction.

use std::fmt;

/// Primitive kind of a record field.
///
/// The engine supports exactly these two kinds; fields of any other type are
/// not described and therefore never serialized or populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Text, copied verbatim.
    String,
    /// Base-10 signed integer.
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
        }
    }
}

/// Describes one field of a [`Record`](crate::Record).
///
/// `name` is used verbatim as the XML element name and as the lookup key when
/// extracting the field from a query fragment, so it is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field and XML element name.
    pub name: &'static str,
    /// Declared primitive kind.
    pub kind: FieldKind,
    /// Whether the field can hold null (`Option<_>` in Rust).
    pub nullable: bool,
}

impl FieldDescriptor {
    /// Creates a non-nullable descriptor.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    /// Creates a descriptor for an optional field.
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}
