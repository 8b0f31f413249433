//! In-memory document store with canned query responses.
//!
//! Nothing is evaluated: each collection maps query expressions to the
//! fragments (or the failure) they return. Clones share state, so a test can
//! keep one clone and inspect open/close counts after handing the other to a
//! [`QueryExecutor`](crate::QueryExecutor).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{CollectionHandle, DocumentStore};
use crate::error::{ConnectionError, QueryError};

type Response = Result<Vec<String>, QueryError>;

#[derive(Debug, Default)]
struct MemoryState {
    collections: HashMap<String, HashMap<String, Response>>,
    unreachable: bool,
    opened: usize,
    closed: usize,
    queries: Vec<(String, String)>,
}

/// A [`DocumentStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every `open` fails with [`ConnectionError::Unreachable`].
    pub fn unreachable() -> Self {
        let store = Self::new();
        store.state.lock().unreachable = true;
        store
    }

    /// Adds an empty collection at `path`.
    pub fn with_collection(self, path: &str) -> Self {
        self.state
            .lock()
            .collections
            .entry(path.to_string())
            .or_default();
        self
    }

    /// Makes `query` against `path` return `fragments`, creating the
    /// collection if needed.
    pub fn with_query_result<I, S>(self, path: &str, query: &str, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments = fragments.into_iter().map(Into::into).collect();
        self.respond(path, query, Ok(fragments))
    }

    /// Makes `query` against `path` fail with `error`, creating the collection
    /// if needed.
    pub fn with_query_failure(self, path: &str, query: &str, error: QueryError) -> Self {
        self.respond(path, query, Err(error))
    }

    fn respond(self, path: &str, query: &str, response: Response) -> Self {
        self.state
            .lock()
            .collections
            .entry(path.to_string())
            .or_default()
            .insert(query.to_string(), response);
        self
    }

    /// Number of handles opened so far.
    pub fn opened(&self) -> usize {
        self.state.lock().opened
    }

    /// Number of handles closed so far.
    pub fn closed(&self) -> usize {
        self.state.lock().closed
    }

    /// `(collection, query)` pairs in submission order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.state.lock().queries.clone()
    }
}

impl DocumentStore for MemoryStore {
    type Handle = MemoryCollection;

    fn open(&self, path: &str) -> Result<MemoryCollection, ConnectionError> {
        let mut state = self.state.lock();
        if state.unreachable {
            return Err(ConnectionError::Unreachable {
                collection: path.to_string(),
                reason: "store is offline".to_string(),
            });
        }
        if !state.collections.contains_key(path) {
            return Err(ConnectionError::CollectionNotFound {
                collection: path.to_string(),
            });
        }
        state.opened += 1;

        Ok(MemoryCollection {
            state: Arc::clone(&self.state),
            collection: path.to_string(),
            closed: false,
        })
    }
}

/// Handle on a [`MemoryStore`] collection.
#[derive(Debug)]
pub struct MemoryCollection {
    state: Arc<Mutex<MemoryState>>,
    collection: String,
    closed: bool,
}

impl CollectionHandle for MemoryCollection {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn query(&mut self, expr: &str) -> Result<Vec<String>, QueryError> {
        if self.closed {
            return Err(QueryError::Closed);
        }

        let mut state = self.state.lock();
        state
            .queries
            .push((self.collection.clone(), expr.to_string()));

        state
            .collections
            .get(&self.collection)
            .and_then(|responses| responses.get(expr))
            .cloned()
            .unwrap_or_else(|| {
                Err(QueryError::Rejected {
                    status: 400,
                    message: format!("no response registered for '{expr}'"),
                })
            })
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.state.lock().closed += 1;
        }
    }
}
