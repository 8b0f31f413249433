use std::sync::Arc;
use std::thread;

use exlibris_record::Record;
use exlibris_serde::ExtractMode;
use exlibris_store::{
    ConnectionError, MemoryStore, QueryError, QueryExecutor, StoreError, StoreResult,
};

const NOVELAS: &str = "/db/Libreria/Novelas";
const ALL_BOOKS: &str = "for $book in //book return $book";

#[derive(Debug, Clone, Default, PartialEq, Record)]
#[record(rename_all = "camelCase")]
struct Book {
    title: Option<String>,
    author: Option<String>,
    publish_year: i32,
}

fn library() -> MemoryStore {
    MemoryStore::new().with_query_result(
        NOVELAS,
        ALL_BOOKS,
        [
            "<book><title>Don Quijote</title><author>Miguel de Cervantes</author><publishYear>1605</publishYear></book>",
            "<book><title>1984</title><author>George Orwell</author><publishYear>1949</publishYear></book>",
        ],
    )
}

#[test]
fn test_run_maps_fragments_in_order() -> StoreResult<()> {
    let store = library();
    let executor = QueryExecutor::new(store.clone());

    let books: Vec<Book> = executor.run(NOVELAS, ALL_BOOKS);
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title.as_deref(), Some("Don Quijote"));
    assert_eq!(books[1].publish_year, 1949);

    assert_eq!(store.opened(), 1);
    assert_eq!(store.closed(), 1);
    assert_eq!(store.queries(), [(NOVELAS.to_string(), ALL_BOOKS.to_string())]);

    Ok(())
}

#[test]
fn test_empty_result() -> StoreResult<()> {
    let store = MemoryStore::new().with_query_result(NOVELAS, "//book[publishYear < 0]", Vec::<String>::new());
    let executor = QueryExecutor::new(store.clone());

    let report = executor.try_run::<Book>(NOVELAS, "//book[publishYear < 0]")?;
    assert!(report.records.is_empty());
    assert!(report.is_clean());
    assert_eq!(store.closed(), 1);

    Ok(())
}

#[test]
fn test_open_failure_yields_empty_result() {
    let store = MemoryStore::unreachable();
    let executor = QueryExecutor::new(store.clone());

    let books: Vec<Book> = executor.run(NOVELAS, ALL_BOOKS);
    assert!(books.is_empty());
    assert_eq!(store.opened(), 0);
    assert_eq!(store.closed(), 0);

    let err = executor.try_run::<Book>(NOVELAS, ALL_BOOKS).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Connection(ConnectionError::Unreachable { .. })
    ));
}

#[test]
fn test_missing_collection_yields_empty_result() {
    let executor = QueryExecutor::new(library());

    let books: Vec<Book> = executor.run("/db/Libreria/Poemas", ALL_BOOKS);
    assert!(books.is_empty());

    let err = executor
        .try_run::<Book>("/db/Libreria/Poemas", ALL_BOOKS)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Connection(ConnectionError::CollectionNotFound { .. })
    ));
}

#[test]
fn test_query_failure_closes_handle() {
    let store = MemoryStore::new().with_query_failure(
        NOVELAS,
        "//book[",
        QueryError::Rejected {
            status: 400,
            message: "unexpected end of expression".to_string(),
        },
    );
    let executor = QueryExecutor::new(store.clone());

    let books: Vec<Book> = executor.run(NOVELAS, "//book[");
    assert!(books.is_empty());
    assert_eq!(store.opened(), 1);
    assert_eq!(store.closed(), 1);

    let err = executor.try_run::<Book>(NOVELAS, "//book[").unwrap_err();
    assert!(matches!(err, StoreError::Query(QueryError::Rejected { status: 400, .. })));
    assert_eq!(store.closed(), 2);
}

#[test]
fn test_bad_fragment_fields_are_reported() -> StoreResult<()> {
    let store = MemoryStore::new().with_query_result(
        NOVELAS,
        ALL_BOOKS,
        ["<book><title>Sin fecha</title><publishYear>desconocido</publishYear></book>"],
    );
    let executor = QueryExecutor::new(store).with_extract_mode(ExtractMode::Structural);
    assert_eq!(executor.extract_mode(), ExtractMode::Structural);

    let report = executor.try_run::<Book>(NOVELAS, ALL_BOOKS)?;
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].publish_year, 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].1.field, "publishYear");

    Ok(())
}

#[test]
fn test_shared_executor_across_threads() {
    let store = library();
    let executor = Arc::new(QueryExecutor::new(store.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || executor.run::<Book>(NOVELAS, ALL_BOOKS).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(store.opened(), 4);
    assert_eq!(store.closed(), 4);
}

#[test]
fn test_executor_over_shared_store() {
    let store = Arc::new(library());
    let executor = QueryExecutor::new(Arc::clone(&store));

    let books: Vec<Book> = executor.run(NOVELAS, ALL_BOOKS);
    assert_eq!(books.len(), 2);
    assert_eq!(store.closed(), 1);
}
