//! Error types for XML serialization and record mapping.

use std::path::PathBuf;

use exlibris_record::{CoercionError, InstantiationError};
use thiserror::Error;

/// Errors raised while rendering or persisting an XML document.
///
/// These are surfaced to the caller of the serializer functions and of
/// [`XmlDocument::write`](crate::xml::XmlDocument::write); nothing in the write
/// path recovers from them.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// The output file could not be created or written, for example because
    /// its parent directory does not exist.
    #[error("cannot write XML document to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An element name is not a usable XML name.
    #[error("invalid XML element name '{0}'")]
    InvalidName(String),

    /// A field value exists but has no XML representation.
    #[error("cannot serialize {record}: {source}")]
    Field {
        record: &'static str,
        #[source]
        source: CoercionError,
    },

    /// A non-optional field reported no value.
    #[error("non-optional field '{field}' of {record} has no value")]
    MissingValue {
        record: &'static str,
        field: &'static str,
    },

    /// XML emitter error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while rendering to a writer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered bytes were not valid UTF-8.
    #[error("rendered XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors that prevent a fragment from becoming a record.
///
/// Unlike coercion failures, which only reset one field, these drop the whole
/// fragment from a batch.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The zero-valued target record could not be constructed.
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    /// The extraction pattern for a field could not be compiled.
    #[error("cannot build extraction pattern for field '{field}': {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_mentions_path() {
        let err = SerializationError::Write {
            path: PathBuf::from("Output/libreria.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Output/libreria.xml"));
        assert!(msg.contains("no such directory"));
    }

    #[test]
    fn test_instantiation_is_transparent() {
        let err = MappingError::from(InstantiationError::new("Essay", "no zero value"));
        assert_eq!(err.to_string(), "cannot instantiate Essay: no zero value");
    }
}
