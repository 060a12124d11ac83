//! Error types for loading a named value pool.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a [`NamedValuePool`](super::NamedValuePool).
#[derive(Debug, Error)]
pub enum PoolError {
    /// File I/O error when reading a pool file.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON `values` payload of a variable row could not be decoded.
    #[error("invalid values for variable '{name}': {source}")]
    InvalidValues {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A pool document is not an object of lists or service maps.
    #[error("invalid pool document: {source}")]
    InvalidDocument {
        #[source]
        source: serde_json::Error,
    },
}
