//! Ex Libris document store layer.
//!
//! This crate runs query expressions against XML document collections and
//! maps the returned fragments into [`Record`](exlibris_record::Record) values.
//!
//! # Architecture
//!
//! - [`core`] - the [`DocumentStore`] and [`CollectionHandle`] traits and the
//!   [`OpenCollection`] guard
//! - [`executor`] - [`QueryExecutor`], which opens, queries, maps and closes
//! - [`backends`] - eXist-db REST and in-memory stores
//! - [`error`] - connection, query and umbrella error types
//!
//! # Quick Start
//!
//! ```
//! use exlibris_record::Record;
//! use exlibris_store::{MemoryStore, QueryExecutor};
//!
//! #[derive(Debug, Default, Record)]
//! struct Poem {
//!     title: Option<String>,
//!     author: Option<String>,
//! }
//!
//! let store = MemoryStore::new().with_query_result(
//!     "/db/Libreria/Poemas",
//!     "for $poem in //poem return $poem",
//!     ["<poem><title>Altazor</title><author>Vicente Huidobro</author></poem>"],
//! );
//!
//! let executor = QueryExecutor::new(store);
//! let poems: Vec<Poem> = executor.run("/db/Libreria/Poemas", "for $poem in //poem return $poem");
//! assert_eq!(poems[0].author.as_deref(), Some("Vicente Huidobro"));
//!
//! // Failures are logged and produce no records.
//! let missing: Vec<Poem> = executor.run("/db/Libreria/Ensayos", "//essay");
//! assert!(missing.is_empty());
//! ```

pub mod backends;
pub mod core;
pub mod error;
pub mod executor;

pub use backends::{MemoryCollection, MemoryStore};
#[cfg(feature = "exist")]
pub use backends::{ExistCollection, ExistConfig, ExistRestStore};
pub use crate::core::{CollectionHandle, DocumentStore, OpenCollection};
pub use error::{ConnectionError, QueryError, StoreError, StoreResult};
pub use executor::QueryExecutor;
