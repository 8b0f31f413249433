//! XML serialization and fragment mapping for records.
//!
//! ## Architecture
//!
//! - **Document model** ([`document`]): a small element tree. A document is
//!   built once per serializer call, rendered with quick-xml and then dropped.
//!
//! - **Serialization** ([`ser`]): walks a record's field descriptor table and
//!   emits one element per non-null field value.
//!
//! - **Extraction** ([`extract`]): locates a field's text inside one query
//!   fragment. The default pattern scan returns the first
//!   `<name>...</name>` match; the structural scan reads quick-xml events.
//!
//! - **Mapping** ([`de`]): turns fragments into records, keeping coercion
//!   failures local to the field they affect.
//!
//! ## Persisted format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <biblioteca>
//!   <book>
//!     <title>Don Quijote</title>
//!     <author>Miguel de Cervantes</author>
//!     <publishYear>1605</publishYear>
//!   </book>
//! </biblioteca>
//! ```
//!
//! (`write` emits it without indentation.)

pub mod de;
pub mod document;
pub mod extract;
pub mod ser;
mod utils;

// Re-export serialization functions
pub use document::{XmlDocument, XmlElement};
pub use ser::{XmlCollection, serialize_many, serialize_one, write};

// Re-export mapping functions
pub use de::{FieldDiagnostic, MappedRecord, MappingReport, ResultMapper};
pub use extract::{ExtractMode, Extractor, extract_field};
