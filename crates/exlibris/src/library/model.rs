//! Library record types.

use std::fmt;

use exlibris_record::Record;
use serde::Serialize;

/// Renders an optional text the way the catalog listings show it.
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Record, Serialize)]
#[record(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_year: i32,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, publish_year: i32) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            publish_year,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{title='{}', author='{}', publishYear={}}}",
            text(&self.title),
            text(&self.author),
            self.publish_year
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Record, Serialize)]
pub struct Poem {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Poem {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}

impl fmt::Display for Poem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Poem{{title='{}', author='{}'}}",
            text(&self.title),
            text(&self.author)
        )
    }
}

/// An essay. `year` is negative for works before the common era.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record, Serialize)]
pub struct Essay {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: i32,
}

impl Essay {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            year,
        }
    }
}

impl fmt::Display for Essay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Essay{{title='{}', author='{}', year={}}}",
            text(&self.title),
            text(&self.author),
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exlibris_record::describe;

    #[test]
    fn test_display() {
        let book = Book::new("1984", "George Orwell", 1949);
        assert_eq!(
            book.to_string(),
            "Book{title='1984', author='George Orwell', publishYear=1949}"
        );

        let poem = Poem {
            title: Some("Rima I".to_string()),
            author: None,
        };
        assert_eq!(poem.to_string(), "Poem{title='Rima I', author='null'}");

        let essay = Essay::new("El arte de la guerra", "Sun Tzu", -500);
        assert_eq!(
            essay.to_string(),
            "Essay{title='El arte de la guerra', author='Sun Tzu', year=-500}"
        );
    }

    #[test]
    fn test_field_names() {
        let names: Vec<_> = describe::<Book>().iter().map(|f| f.name).collect();
        assert_eq!(names, ["title", "author", "publishYear"]);
        assert_eq!(Book::element_name(), "book");
        assert_eq!(Essay::element_name(), "essay");
    }

    #[test]
    fn test_json_uses_xml_field_names() {
        let json = serde_json::to_value(Book::new("1984", "George Orwell", 1949)).unwrap();
        assert_eq!(json["publishYear"], 1949);
        assert_eq!(json["title"], "1984");
    }
}
