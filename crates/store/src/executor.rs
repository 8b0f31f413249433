//! Query execution: open, query, map, close.

use exlibris_record::Record;
use exlibris_serde::{ExtractMode, MappingReport, ResultMapper};
use parking_lot::Mutex;
use tracing::{debug, error};

use crate::core::{CollectionHandle, DocumentStore};
use crate::error::StoreResult;

/// Runs query expressions against collections of a [`DocumentStore`] and maps
/// the result fragments into records.
///
/// The executor owns its store connection. Every run holds an internal lock
/// from open to close, so an executor can be shared between threads while the
/// store sees one open handle at a time.
#[derive(Debug)]
pub struct QueryExecutor<S> {
    store: S,
    extract_mode: ExtractMode,
    gate: Mutex<()>,
}

impl<S: DocumentStore> QueryExecutor<S> {
    /// Creates an executor using [`ExtractMode::Pattern`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            extract_mode: ExtractMode::default(),
            gate: Mutex::new(()),
        }
    }

    /// Sets the extraction mode used for every run.
    pub fn with_extract_mode(mut self, mode: ExtractMode) -> Self {
        self.extract_mode = mode;
        self
    }

    pub fn extract_mode(&self) -> ExtractMode {
        self.extract_mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs `query` against `collection` and maps the fragments into `T`.
    ///
    /// The collection handle is closed before this returns, whatever the
    /// outcome.
    pub fn try_run<T: Record>(&self, collection: &str, query: &str) -> StoreResult<MappingReport<T>> {
        let mapper = ResultMapper::<T>::with_mode(self.extract_mode)?;

        let _gate = self.gate.lock();
        let mut handle = self.store.open_scoped(collection)?;

        debug!(collection, query, "Submitting query");
        let fragments = handle.query(query)?;
        debug!(collection, fragments = fragments.len(), "Query returned");

        Ok(mapper.map_all_report(&fragments))
    }

    /// Like [`try_run`](Self::try_run), but logs any failure and returns an
    /// empty result instead.
    pub fn run<T: Record>(&self, collection: &str, query: &str) -> Vec<T> {
        match self.try_run::<T>(collection, query) {
            Ok(report) => report.into_records(),
            Err(err) => {
                error!(
                    collection,
                    query,
                    record = T::TYPE_NAME,
                    error = %err,
                    "Query failed"
                );
                Vec::new()
            }
        }
    }
}
