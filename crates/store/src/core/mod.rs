//! Store traits.
//!
//! A [`DocumentStore`] opens collections by path; the resulting
//! [`CollectionHandle`] evaluates query expressions and returns one raw XML
//! fragment per result item. Handles must be closed; [`OpenCollection`] does
//! it on drop.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConnectionError, QueryError};

/// An open collection.
pub trait CollectionHandle {
    /// The path this handle was opened with.
    fn collection(&self) -> &str;

    /// Evaluates `expr` against the collection. The expression is passed to
    /// the store unmodified.
    fn query(&mut self, expr: &str) -> Result<Vec<String>, QueryError>;

    /// Releases the handle. Calling it again has no effect.
    fn close(&mut self);
}

/// A store of XML document collections.
pub trait DocumentStore {
    type Handle: CollectionHandle;

    /// Opens the collection at `path` (e.g. `/db/Libreria/Novelas`).
    fn open(&self, path: &str) -> Result<Self::Handle, ConnectionError>;

    /// Opens `path` and wraps the handle so that it is closed on every exit
    /// path.
    fn open_scoped(&self, path: &str) -> Result<OpenCollection<Self::Handle>, ConnectionError> {
        let handle = self.open(path)?;
        debug!(collection = %path, "Collection opened");
        Ok(OpenCollection::new(handle))
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    type Handle = S::Handle;

    fn open(&self, path: &str) -> Result<Self::Handle, ConnectionError> {
        (**self).open(path)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    type Handle = S::Handle;

    fn open(&self, path: &str) -> Result<Self::Handle, ConnectionError> {
        (**self).open(path)
    }
}

/// Scoped collection handle: closes the wrapped handle when dropped.
#[derive(Debug)]
pub struct OpenCollection<H: CollectionHandle> {
    handle: H,
}

impl<H: CollectionHandle> OpenCollection<H> {
    pub fn new(handle: H) -> Self {
        Self { handle }
    }
}

impl<H: CollectionHandle> Deref for OpenCollection<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.handle
    }
}

impl<H: CollectionHandle> DerefMut for OpenCollection<H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut self.handle
    }
}

impl<H: CollectionHandle> Drop for OpenCollection<H> {
    fn drop(&mut self) {
        self.handle.close();
        debug!(collection = %self.handle.collection(), "Collection closed");
    }
}
