//! eXist-db backend.
//!
//! Collections are addressed by their database path (`/db/Libreria/Novelas`)
//! relative to the REST root, and queries are sent as `_query` parameters with
//! wrapped results.

mod client;
mod config;
pub mod response;

pub use client::{ExistCollection, ExistRestStore};
pub use config::ExistConfig;
