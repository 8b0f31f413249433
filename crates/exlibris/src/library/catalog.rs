//! The sample catalog: three collections written to three files.

use std::path::{Path, PathBuf};

use exlibris_serde::{SerializationError, XmlCollection, XmlDocument};

use super::model::{Book, Essay, Poem};

/// One generated catalog file.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// File (and uploaded resource) name.
    pub file_name: &'static str,
    /// Sub-collection the file is uploaded to and queried from.
    pub collection: &'static str,
    pub document: XmlDocument,
}

pub fn books() -> XmlCollection<Book> {
    let mut books = XmlCollection::new("BiBLIOTEca");
    books.add_items([
        Book::new("Don Quijote", "Miguel de Cervantes", 1605),
        Book::new("1984", "George Orwell", 1949),
    ]);
    books
}

pub fn poems() -> XmlCollection<Poem> {
    let mut poems = XmlCollection::new("POEMARIO");
    poems.add_items([
        Poem::new("Rima I", "Gustavo Adolfo Bécquer"),
        Poem::new("Altazor", "Vicente Huidobro"),
    ]);
    poems
}

pub fn essays() -> XmlCollection<Essay> {
    let mut essays = XmlCollection::new("ensayos");
    essays.add_items([
        Essay::new("La Rebelión de las Masas", "José Ortega y Gasset", 1930),
        Essay::new("El arte de la guerra", "Sun Tzu", -500),
    ]);
    essays
}

/// Every catalog file, in generation order.
pub fn entries() -> Result<Vec<CatalogEntry>, SerializationError> {
    Ok(vec![
        CatalogEntry {
            file_name: "libreria.xml",
            collection: super::NOVELS,
            document: books().to_document()?,
        },
        CatalogEntry {
            file_name: "poemario.xml",
            collection: super::POEMS,
            document: poems().to_document()?,
        },
        CatalogEntry {
            file_name: "ensayos.xml",
            collection: super::ESSAYS,
            document: essays().to_document()?,
        },
    ])
}

/// Writes every catalog file into `dir`, which must exist.
pub fn write_all(dir: &Path) -> Result<Vec<PathBuf>, SerializationError> {
    entries()?
        .into_iter()
        .map(|entry| {
            let path = dir.join(entry.file_name);
            entry.document.write(&path)?;
            Ok(path)
        })
        .collect()
}
