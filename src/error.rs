//! Error types for the content pipeline
//!
//! Per-document failures never escape the content index: they are logged and
//! the offending document is dropped. "Not found" is an `Option::None`, not an
//! error.

use std::path::PathBuf;
use thiserror::Error;

/// A document whose front matter cannot be read
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid markdown format: missing front matter")]
    MissingFrontMatter,

    #[error("invalid markdown format: front matter is never closed by a `---` line")]
    UnterminatedFrontMatter,

    #[error("front matter is missing required field `{0}`")]
    MissingField(&'static str),
}

/// A document or the author registry could not be retrieved
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("document discovery failed for {root:?}: {message}")]
    Discovery { root: PathBuf, message: String },

    #[error("content indexing task failed: {0}")]
    Task(String),
}

/// Any failure that excludes a single document from the index
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
