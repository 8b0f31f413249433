//! Library queries.

use exlibris_store::{DocumentStore, QueryExecutor};

use super::model::{Book, Essay, Poem};
use super::{ESSAYS, NOVELS, POEMS};

pub const ALL_BOOKS: &str = "for $book in //book return $book";
pub const BOOKS_BEFORE_1950: &str = "//book[publishYear < 1950]";
pub const ALL_POEMS: &str = "for $poem in //poem return $poem";
pub const ESSAYS_BEFORE_YEAR_ZERO: &str = "//essay[year < 0]";

/// Read access to the library. Failures surface as empty results.
pub trait LibraryDao {
    fn all_books(&self) -> Vec<Book>;
    fn books_before_1950(&self) -> Vec<Book>;
    fn all_poems(&self) -> Vec<Poem>;
    fn essays_before_year_zero(&self) -> Vec<Essay>;
}

/// [`LibraryDao`] over a document store laid out as
/// `{base}Novelas`, `{base}Poemas` and `{base}Ensayos`.
#[derive(Debug)]
pub struct ExistLibraryDao<S> {
    executor: QueryExecutor<S>,
    novels: String,
    poems: String,
    essays: String,
}

impl<S: DocumentStore> ExistLibraryDao<S> {
    /// `base` is a collection path such as `/db/Libreria/`; a missing
    /// trailing slash is added.
    pub fn new(executor: QueryExecutor<S>, base: &str) -> Self {
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        Self {
            executor,
            novels: format!("{base}{NOVELS}"),
            poems: format!("{base}{POEMS}"),
            essays: format!("{base}{ESSAYS}"),
        }
    }

    pub fn executor(&self) -> &QueryExecutor<S> {
        &self.executor
    }
}

impl<S: DocumentStore> LibraryDao for ExistLibraryDao<S> {
    fn all_books(&self) -> Vec<Book> {
        self.executor.run(&self.novels, ALL_BOOKS)
    }

    fn books_before_1950(&self) -> Vec<Book> {
        self.executor.run(&self.novels, BOOKS_BEFORE_1950)
    }

    fn all_poems(&self) -> Vec<Poem> {
        self.executor.run(&self.poems, ALL_POEMS)
    }

    fn essays_before_year_zero(&self) -> Vec<Essay> {
        self.executor.run(&self.essays, ESSAYS_BEFORE_YEAR_ZERO)
    }
}
