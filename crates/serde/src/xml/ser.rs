//! Record to XML serialization.
//!
//! Serialization walks the record's field descriptor table rather than the
//! value itself, so every record type is handled by the same code: one element
//! per non-null field, named exactly like the field. A value that cannot be
//! written fails the whole document instead of disappearing from it.

use std::path::Path;

use exlibris_record::Record;

use crate::error::{Result, SerializationError};
use crate::xml::document::{XmlDocument, XmlElement};

/// Serializes one record into a document rooted at the record's element name.
///
/// # Examples
///
/// ```
/// use exlibris_record::Record;
/// use exlibris_serde::serialize_one;
///
/// #[derive(Record)]
/// struct Poem {
///     title: Option<String>,
///     author: Option<String>,
/// }
///
/// let poem = Poem { title: Some("Altazor".into()), author: None };
/// let xml = serialize_one(&poem)?.to_xml_string()?;
/// assert_eq!(xml, "<poem><title>Altazor</title></poem>");
/// # Ok::<(), exlibris_serde::SerializationError>(())
/// ```
pub fn serialize_one<T: Record>(record: &T) -> Result<XmlDocument> {
    Ok(XmlDocument::new(record_element(record)?))
}

/// Serializes a sequence of records under `parent_tag`.
///
/// The parent tag is used verbatim; [`XmlCollection`] is the place where
/// collection names are lower-cased.
pub fn serialize_many<'a, T, I>(records: I, parent_tag: &str) -> Result<XmlDocument>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut root = XmlElement::new(parent_tag);
    for record in records {
        root.push(record_element(record)?);
    }
    Ok(XmlDocument::new(root))
}

/// Writes `document` to `path`. See [`XmlDocument::write`].
pub fn write<P: AsRef<Path>>(document: &XmlDocument, path: P) -> Result<()> {
    document.write(path)
}

fn record_element<T: Record>(record: &T) -> Result<XmlElement> {
    let mut element = XmlElement::new(T::element_name());
    for field in T::fields() {
        let value = record
            .try_value_of(field.name)
            .map_err(|source| SerializationError::Field {
                record: T::TYPE_NAME,
                source,
            })?;
        match value {
            Some(value) => element.push(XmlElement::with_text(field.name, value.to_text())),
            None if field.nullable => {}
            None => {
                return Err(SerializationError::MissingValue {
                    record: T::TYPE_NAME,
                    field: field.name,
                });
            }
        }
    }
    Ok(element)
}

/// A named, ordered collection of records of one type.
///
/// The name becomes the root tag of the serialized document and is lower-cased
/// once, when the collection is created.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlCollection<T> {
    name: String,
    items: Vec<T>,
}

impl<T> XmlCollection<T> {
    /// Creates an empty collection. `name` is stored lower-cased.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            items: Vec::new(),
        }
    }

    /// Appends one item.
    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    /// Appends several items, keeping their order.
    pub fn add_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
    }

    /// The collection name (lower-cased).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The items, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Record> XmlCollection<T> {
    /// Serializes the collection: root tag = collection name, one item element
    /// per record.
    pub fn to_document(&self) -> Result<XmlDocument> {
        serialize_many(&self.items, &self.name)
    }
}

impl<T> Extend<T> for XmlCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
