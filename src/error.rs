//! Error type shared by the document model and persistence layer.

use thiserror::Error;

/// A specialized `Result` type for markdraft operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A stored record (or a block built from one) breaks a document invariant.
    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    /// A pending marker token that maps to no style.
    #[error("unresolvable marker: {0:?}")]
    UnresolvableMarker(String),

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The key-value store could not be read or written.
    #[error("store access failed for key {key:?}: {source}")]
    Store {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
