//! Parsing of wrapped eXist-db query responses.
//!
//! With `_wrap=yes` the REST interface returns
//!
//! ```xml
//! <exist:result xmlns:exist="http://exist.sourceforge.net/NS/exist" exist:hits="2" exist:start="1" exist:count="2">
//!   <book>...</book>
//!   <book>...</book>
//! </exist:result>
//! ```
//!
//! Each top-level child becomes one fragment, sliced verbatim out of the body.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;

use crate::error::QueryError;

/// Splits a wrapped result body into its item fragments, in order.
pub fn split_result_fragments(body: &str) -> Result<Vec<String>, QueryError> {
    let mut reader = Reader::from_str(body);
    let mut fragments = Vec::new();

    let mut depth = 0usize;
    let mut item_start = 0usize;
    let mut text = String::new();

    loop {
        let before = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err(malformed(format!("{e} at byte {before}"))),
        };
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(start) => {
                if depth == 0 {
                    check_root(start.local_name().as_ref())?;
                } else if depth == 1 {
                    flush_text(&mut text, &mut fragments);
                    item_start = before;
                }
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    check_root(empty.local_name().as_ref())?;
                    return Ok(fragments);
                }
                if depth == 1 {
                    flush_text(&mut text, &mut fragments);
                    fragments.push(body[before..after].to_string());
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("unbalanced end tag".to_string()))?;
                match depth {
                    0 => {
                        flush_text(&mut text, &mut fragments);
                        return Ok(fragments);
                    }
                    1 => fragments.push(body[item_start..after].to_string()),
                    _ => {}
                }
            }
            Event::Text(raw) if depth == 1 => {
                text.push_str(&decode(&String::from_utf8_lossy(&raw)));
            }
            Event::GeneralRef(reference) if depth == 1 => {
                text.push_str(&decode(&format!("&{};", String::from_utf8_lossy(&reference))));
            }
            Event::CData(cdata) if depth == 1 => {
                text.push_str(&String::from_utf8_lossy(&cdata));
            }
            Event::Eof => {
                return Err(malformed(if depth == 0 {
                    "response has no result element".to_string()
                } else {
                    "response ended inside the result element".to_string()
                }));
            }
            _ => {}
        }
    }
}

fn check_root(name: &[u8]) -> Result<(), QueryError> {
    if name == b"result" {
        Ok(())
    } else {
        Err(malformed(format!(
            "unexpected root element <{}>",
            String::from_utf8_lossy(name)
        )))
    }
}

/// Atomic results arrive as bare text between items.
fn flush_text(text: &mut String, fragments: &mut Vec<String>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
    text.clear();
}

fn decode(raw: &str) -> String {
    match unescape(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn malformed(reason: String) -> QueryError {
    QueryError::MalformedResponse { reason }
}
