//! Store backends.
//!
//! - [`memory`]: canned responses, always available.
//! - [`exist`]: eXist-db over its REST interface (feature `exist`, on by
//!   default).

#[cfg(feature = "exist")]
pub mod exist;
pub mod memory;

#[cfg(feature = "exist")]
pub use exist::{ExistCollection, ExistConfig, ExistRestStore};
pub use memory::{MemoryCollection, MemoryStore};
