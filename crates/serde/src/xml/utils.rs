//! Utility functions for XML serialization and extraction.

use std::borrow::Cow;

use quick_xml::escape;

/// Checks that `name` can be written as an element name.
///
/// This is deliberately looser than the XML `Name` production: it rejects the
/// characters that would break the markup (whitespace, `<`, `>`, `&`, `/`,
/// `=`, quotes) and names that cannot start an element.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() || matches!(first, '-' | '.') {
        return false;
    }
    name.chars().all(|c| {
        !c.is_whitespace() && !c.is_control() && !matches!(c, '<' | '>' | '&' | '/' | '=' | '"' | '\'' | '?' | '!')
    })
}

/// Decodes predefined entities and character references in raw element text.
///
/// Text that cannot be decoded (a stray `&`, an unknown entity) is returned
/// unchanged.
pub fn decode_text(raw: &str) -> Cow<'_, str> {
    escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Decodes a general entity reference (`amp`, `#60`, `#x3C`) to its text.
pub fn decode_reference(name: &str) -> String {
    let raw = format!("&{name};");
    match escape::unescape(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_element_name() {
        assert!(is_valid_element_name("biblioteca"));
        assert!(is_valid_element_name("publishYear"));
        assert!(is_valid_element_name("exist:result"));
        assert!(is_valid_element_name("_private"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("1984"));
        assert!(!is_valid_element_name("publish year"));
        assert!(!is_valid_element_name("a<b"));
        assert!(!is_valid_element_name("a/b"));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_text("&lt;b&gt;"), "<b>");
        assert_eq!(decode_text("&#241;"), "ñ");
        assert_eq!(decode_text("plain"), "plain");
        assert_eq!(decode_text("broken & text"), "broken & text");
    }

    #[test]
    fn test_decode_reference() {
        assert_eq!(decode_reference("amp"), "&");
        assert_eq!(decode_reference("#x3C"), "<");
        assert_eq!(decode_reference("nbsp"), "&nbsp;");
    }
}
