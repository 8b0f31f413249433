//! # Ex Libris XML Serialization Module
//!
//! This crate converts [`Record`](exlibris_record::Record) values to XML documents and
//! maps XML fragments returned by a document store back into typed records.
//!
//! ## Write path
//!
//! - [`serialize_one`]: one record becomes a document whose root is the record's
//!   element name (`Book` → `<book>`), with one child per non-null field.
//! - [`serialize_many`] / [`XmlCollection`]: a sequence of records becomes a
//!   document under a caller-chosen parent tag, one item element per record.
//! - [`XmlDocument::write`]: persists the document as UTF-8 XML.
//!
//! ## Read path
//!
//! - [`Extractor`]: finds a field's text inside one fragment, either with the
//!   first-match pattern scan ([`ExtractMode::Pattern`]) or with a structural
//!   parse ([`ExtractMode::Structural`]).
//! - [`ResultMapper`]: instantiates the target record, extracts and coerces
//!   every described field, and collects non-fatal diagnostics.
//!
//! ## Mapping
//!
//! | Record | XML |
//! |--------|-----|
//! | `Book { title: Some("1984"), .. }` | `<book><title>1984</title>...</book>` |
//! | `Book { title: None, .. }` | `<book>...</book>` (no `<title>`) |
//! | `Book { title: Some(""), .. }` | `<book><title></title>...</book>` |
//!
//! ## Examples
//!
//! ```
//! use exlibris_record::Record;
//! use exlibris_serde::{ResultMapper, XmlCollection};
//!
//! #[derive(Debug, Default, Record)]
//! #[record(rename_all = "camelCase")]
//! struct Book {
//!     title: Option<String>,
//!     publish_year: i32,
//! }
//!
//! let mut library = XmlCollection::new("BiBLIOTEca");
//! library.add_item(Book { title: Some("1984".into()), publish_year: 1949 });
//!
//! let xml = library.to_document()?.to_xml_string()?;
//! assert_eq!(
//!     xml,
//!     "<biblioteca><book><title>1984</title><publishYear>1949</publishYear></book></biblioteca>"
//! );
//!
//! let mapper = ResultMapper::<Book>::new()?;
//! let books = mapper.map_all(["<book><title>1984</title><publishYear>1949</publishYear></book>"]);
//! assert_eq!(books[0].publish_year, 1949);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod xml;

// Re-export common types and functions
pub use error::{MappingError, Result, SerializationError};

pub use xml::{
    ExtractMode, Extractor, FieldDiagnostic, MappedRecord, MappingReport, ResultMapper,
    XmlCollection, XmlDocument, XmlElement, extract_field, serialize_many, serialize_one, write,
};
