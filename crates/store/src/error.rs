//! Error types for store access and query execution.
//!
//! Opening a collection fails with [`ConnectionError`], running an expression
//! with [`QueryError`]. [`StoreError`] wraps both, together with the mapping
//! and upload failures, for callers that want one error type.

// Variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use exlibris_serde::{MappingError, SerializationError};
use thiserror::Error;

/// A collection could not be opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The collection path or the store base URL does not form a valid URI.
    #[error("invalid collection URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The store configuration was rejected before any connection attempt.
    #[error("invalid store configuration: {}", problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    /// The store refused the credentials.
    #[error("not authorized to open collection {collection} (HTTP {status})")]
    Unauthorized { collection: String, status: u16 },

    /// The collection does not exist.
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    /// The store could not be reached or answered unexpectedly.
    #[error("store unreachable while opening {collection}: {reason}")]
    Unreachable { collection: String, reason: String },
}

/// A query expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The store rejected the expression.
    #[error("query rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request or its response was lost in transit.
    #[error("query transport failure: {reason}")]
    Transport { reason: String },

    /// The response body is not a well-formed result sequence.
    #[error("malformed query response: {reason}")]
    MalformedResponse { reason: String },

    /// The handle was already closed.
    #[error("collection handle is closed")]
    Closed,
}

/// Umbrella error for executor and upload operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A document could not be rendered for upload.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The store did not accept an uploaded document.
    #[error("cannot upload {resource} to {collection}: {reason}")]
    Upload {
        collection: String,
        resource: String,
        reason: String,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
