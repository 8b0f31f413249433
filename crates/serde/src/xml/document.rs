//! In-memory XML document produced by the serializer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use crate::error::{Result, SerializationError};
use crate::xml::utils;

/// One element: a name, optional text, and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an element with no text and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf element holding `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Appends a child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The child elements, in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// The first child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }
}

/// A complete XML document: a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Creates a document from its root element.
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Renders the document body (no XML declaration, no indentation).
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Renders the document body indented by two spaces.
    pub fn to_xml_string_pretty(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Writes the persisted form (declaration followed by the compact body) to
    /// `writer`.
    pub fn to_xml_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::new(writer);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        writer.into_inner().flush()?;
        Ok(())
    }

    /// Writes the document to `path` as UTF-8 XML.
    ///
    /// The file is created or truncated. Parent directories are not created:
    /// a missing directory fails with [`SerializationError::Write`].
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let write_error = |source| SerializationError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        self.to_xml_writer(BufWriter::new(file))
            .map_err(|err| match err {
                SerializationError::Io(source) => write_error(source),
                other => other,
            })?;

        info!(
            path = %path.display(),
            root = %self.root.name,
            items = self.root.children.len(),
            "XML document written"
        );
        Ok(())
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    if !utils::is_valid_element_name(&element.name) {
        return Err(SerializationError::InvalidName(element.name.clone()));
    }

    let start = BytesStart::new(element.name.as_str());
    let text = element.text.as_deref();

    // Only text-less elements self-close; `Some("")` keeps an explicit end tag.
    // The text event is written even when empty so that indentation never
    // lands between the tags.
    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlDocument {
        let mut book = XmlElement::new("book");
        book.push(XmlElement::with_text("title", "Rima I"));
        book.push(XmlElement::with_text("year", "1871"));
        let mut root = XmlElement::new("poemario");
        root.push(book);
        XmlDocument::new(root)
    }

    #[test]
    fn test_compact_rendering() {
        assert_eq!(
            sample().to_xml_string().unwrap(),
            "<poemario><book><title>Rima I</title><year>1871</year></book></poemario>"
        );
    }

    #[test]
    fn test_pretty_rendering_keeps_text_inline() {
        let xml = sample().to_xml_string_pretty().unwrap();
        assert!(xml.starts_with("<poemario>\n  <book>\n    <title>Rima I</title>"));
        assert!(xml.ends_with("</book>\n</poemario>"));
    }

    #[test]
    fn test_only_textless_elements_are_self_closed() {
        let mut root = XmlElement::new("ensayos");
        root.push(XmlElement::new("essay"));
        root.push(XmlElement::with_text("title", ""));
        let doc = XmlDocument::new(root);

        assert_eq!(
            doc.to_xml_string().unwrap(),
            "<ensayos><essay/><title></title></ensayos>"
        );
        assert_eq!(
            doc.to_xml_string_pretty().unwrap(),
            "<ensayos>\n  <essay/>\n  <title></title>\n</ensayos>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let root = XmlElement::with_text("title", "Tom & Jerry <3");
        let xml = XmlDocument::new(root).to_xml_string().unwrap();
        assert_eq!(xml, "<title>Tom &amp; Jerry &lt;3</title>");
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let err = XmlDocument::new(XmlElement::new("")).to_xml_string().unwrap_err();
        assert!(matches!(err, SerializationError::InvalidName(_)));
    }

    #[test]
    fn test_writer_output_has_declaration() {
        let mut out = Vec::new();
        sample().to_xml_writer(&mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><poemario>"#));
    }

    #[test]
    fn test_child_lookup() {
        let doc = sample();
        let book = doc.root().child("book").unwrap();
        assert_eq!(book.child("title").and_then(XmlElement::text), Some("Rima I"));
        assert!(book.child("author").is_none());
    }
}
