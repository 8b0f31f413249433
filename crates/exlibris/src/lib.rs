//! Ex Libris
//!
//! Library records (books, poems, essays) kept as XML document collections
//! in eXist-db.
//!
//! - [`library`] - the record types, the sample catalog and the DAO
//! - [`config`] - command line and environment configuration
//!
//! The `exlibris` binary writes the sample catalog to disk (optionally
//! uploading it) and runs the library queries against a server.

pub mod config;
pub mod library;

pub use config::ExlibrisConfig;
pub use library::{Book, Essay, ExistLibraryDao, LibraryDao, LibraryReport, Poem};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr so that
/// query results on stdout stay machine readable.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "exlibris={level},exlibris_serde={level},exlibris_store={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
