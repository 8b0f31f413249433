//! The library domain: record types, sample catalog and queries.

pub mod catalog;
pub mod dao;
pub mod model;

use std::fmt;

use serde::Serialize;

pub use catalog::CatalogEntry;
pub use dao::{ExistLibraryDao, LibraryDao};
pub use model::{Book, Essay, Poem};

/// Sub-collection holding the books.
pub const NOVELS: &str = "Novelas";
/// Sub-collection holding the poems.
pub const POEMS: &str = "Poemas";
/// Sub-collection holding the essays.
pub const ESSAYS: &str = "Ensayos";

/// The results of every library query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryReport {
    pub books: Vec<Book>,
    pub books_before_1950: Vec<Book>,
    pub poems: Vec<Poem>,
    pub essays_before_year_zero: Vec<Essay>,
}

impl LibraryReport {
    /// Runs every query of `dao`.
    pub fn collect<D: LibraryDao + ?Sized>(dao: &D) -> Self {
        Self {
            books: dao.all_books(),
            books_before_1950: dao.books_before_1950(),
            poems: dao.all_poems(),
            essays_before_year_zero: dao.essays_before_year_zero(),
        }
    }
}

fn section<T: fmt::Display>(f: &mut fmt::Formatter<'_>, heading: &str, items: &[T]) -> fmt::Result {
    writeln!(f, "{heading}:")?;
    if items.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for item in items {
        writeln!(f, "  {item}")?;
    }
    Ok(())
}

impl fmt::Display for LibraryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "Books", &self.books)?;
        section(f, "Books before 1950", &self.books_before_1950)?;
        section(f, "Poems", &self.poems)?;
        section(f, "Essays before year 0", &self.essays_before_year_zero)
    }
}
