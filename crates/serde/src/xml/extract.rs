//! Field extraction from query result fragments.
//!
//! A fragment is one serialized record as returned by the store, e.g.
//! `<book><title>1984</title><publishYear>1949</publishYear></book>`.
//! A field is looked up by its element name; the enclosing element is not
//! checked.
//!
//! Both modes return the first occurrence of the element in document order.
//! The table shows where they differ:
//!
//! | Fragment | Pattern | Structural |
//! |----------|---------|------------|
//! | `<title>A &amp; B</title>` | `A & B` | `A & B` |
//! | `<title><i>A</i></title>` | `<i>A</i>` | `A` |
//! | `<title/>` | not found | `""` |
//! | `<title lang="es">A</title>` | not found | `A` |
//! | `<title>A` (unclosed) | not found | not found |

use std::collections::HashMap;

use exlibris_record::FieldDescriptor;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use tracing::warn;

use crate::error::MappingError;
use crate::xml::utils;

/// How [`Extractor`] locates a field inside a fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtractMode {
    /// First non-greedy `<name>...</name>` match over the raw text, spanning
    /// line breaks. The captured text is entity-decoded.
    #[default]
    Pattern,
    /// First element with the name in a quick-xml event stream; its value is
    /// the concatenated text of all descendants.
    Structural,
}

/// Extracts field texts from fragments.
///
/// Built once per target record type: in pattern mode one regex is compiled
/// per described field.
#[derive(Debug, Clone)]
pub struct Extractor {
    mode: ExtractMode,
    patterns: HashMap<&'static str, Regex>,
}

impl Extractor {
    /// Prepares an extractor for `fields`.
    pub fn new(fields: &[FieldDescriptor], mode: ExtractMode) -> Result<Self, MappingError> {
        let mut patterns = HashMap::new();
        if mode == ExtractMode::Pattern {
            for field in fields {
                patterns.insert(field.name, field_pattern(field.name)?);
            }
        }
        Ok(Self { mode, patterns })
    }

    /// The extraction mode.
    pub fn mode(&self) -> ExtractMode {
        self.mode
    }

    /// Returns the text of the first `field` element in `fragment`, or `None`
    /// when there is none.
    pub fn extract(&self, fragment: &str, field: &str) -> Option<String> {
        match self.mode {
            ExtractMode::Pattern => match self.patterns.get(field) {
                Some(pattern) => pattern_extract(pattern, fragment),
                None => field_pattern(field)
                    .ok()
                    .and_then(|pattern| pattern_extract(&pattern, fragment)),
            },
            ExtractMode::Structural => structural_extract(fragment, field),
        }
    }
}

/// One-shot pattern extraction of `field` from `fragment`.
///
/// Compiles the pattern on every call; use an [`Extractor`] for batches.
///
/// ```
/// use exlibris_serde::extract_field;
///
/// let fragment = "<book><title>Don Quijote</title></book>";
/// assert_eq!(extract_field(fragment, "title").as_deref(), Some("Don Quijote"));
/// assert_eq!(extract_field(fragment, "author"), None);
/// ```
pub fn extract_field(fragment: &str, field: &str) -> Option<String> {
    let pattern = field_pattern(field).ok()?;
    pattern_extract(&pattern, fragment)
}

fn field_pattern(field: &str) -> Result<Regex, MappingError> {
    let name = regex::escape(field);
    Regex::new(&format!("(?s)<{name}>(.*?)</{name}>")).map_err(|source| MappingError::Pattern {
        field: field.to_string(),
        source,
    })
}

fn pattern_extract(pattern: &Regex, fragment: &str) -> Option<String> {
    let captures = pattern.captures(fragment)?;
    let raw = captures.get(1)?.as_str();
    Some(utils::decode_text(raw).into_owned())
}

fn structural_extract(fragment: &str, field: &str) -> Option<String> {
    let mut reader = Reader::from_str(fragment);
    let target = field.as_bytes();

    // Depth inside the matched element; 0 while still searching.
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                warn!(
                    field,
                    position = reader.buffer_position(),
                    error = %err,
                    "Malformed result fragment"
                );
                return None;
            }
        };

        match event {
            Event::Start(start) => {
                if depth > 0 {
                    depth += 1;
                } else if start.name().as_ref() == target {
                    depth = 1;
                }
            }
            Event::Empty(empty) => {
                if depth == 0 && empty.name().as_ref() == target {
                    return Some(String::new());
                }
            }
            Event::End(_) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(text);
                }
            }
            Event::Text(raw) if depth > 0 => {
                text.push_str(&utils::decode_text(&String::from_utf8_lossy(&raw)));
            }
            Event::CData(cdata) if depth > 0 => {
                text.push_str(&String::from_utf8_lossy(&cdata));
            }
            Event::GeneralRef(reference) if depth > 0 => {
                text.push_str(&utils::decode_reference(&String::from_utf8_lossy(
                    &reference,
                )));
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exlibris_record::{FieldDescriptor, FieldKind};

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::nullable("title", FieldKind::String),
        FieldDescriptor::new("publishYear", FieldKind::Integer),
    ];

    #[test]
    fn test_pattern_first_match_wins() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Pattern).unwrap();
        let fragment = "<book><title>A</title><title>B</title></book>";
        assert_eq!(extractor.extract(fragment, "title").as_deref(), Some("A"));
    }

    #[test]
    fn test_pattern_spans_lines_and_decodes() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Pattern).unwrap();
        let fragment = "<book>\n  <title>Tom &amp;\nJerry</title>\n</book>";
        assert_eq!(
            extractor.extract(fragment, "title").as_deref(),
            Some("Tom &\nJerry")
        );
    }

    #[test]
    fn test_pattern_keeps_nested_markup() {
        let fragment = "<book><title><i>Altazor</i></title></book>";
        assert_eq!(
            extract_field(fragment, "title").as_deref(),
            Some("<i>Altazor</i>")
        );
    }

    #[test]
    fn test_pattern_ignores_attributes_and_self_closed() {
        assert_eq!(extract_field(r#"<title lang="es">A</title>"#, "title"), None);
        assert_eq!(extract_field("<book><title/></book>", "title"), None);
    }

    #[test]
    fn test_pattern_undeclared_field_still_extracts() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Pattern).unwrap();
        assert_eq!(
            extractor.extract("<x><author>Sun Tzu</author></x>", "author").as_deref(),
            Some("Sun Tzu")
        );
    }

    #[test]
    fn test_structural_first_element_wins() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Structural).unwrap();
        let fragment = "<book><title>A</title><title>B</title></book>";
        assert_eq!(extractor.extract(fragment, "title").as_deref(), Some("A"));
    }

    #[test]
    fn test_structural_concatenates_descendant_text() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Structural).unwrap();
        let fragment = "<book><title><i>Rima</i> I &amp; II</title></book>";
        assert_eq!(
            extractor.extract(fragment, "title").as_deref(),
            Some("Rima I & II")
        );
    }

    #[test]
    fn test_structural_empty_element_is_empty_text() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Structural).unwrap();
        assert_eq!(
            extractor.extract("<book><title/></book>", "title").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_structural_malformed_is_missing() {
        let extractor = Extractor::new(FIELDS, ExtractMode::Structural).unwrap();
        assert_eq!(extractor.extract("<book><title>A</book>", "title"), None);
        assert_eq!(extractor.extract("<book><title>A", "title"), None);
    }

    #[test]
    fn test_missing_field() {
        for mode in [ExtractMode::Pattern, ExtractMode::Structural] {
            let extractor = Extractor::new(FIELDS, mode).unwrap();
            assert_eq!(extractor.extract("<book></book>", "publishYear"), None);
        }
    }
}
