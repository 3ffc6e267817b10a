//! Error types surfaced by the public API.
//!
//! Content problems (bad syntax, bad encoding) are data on the processed
//! source; only configuration mistakes and I/O failures are returned as `Err`.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::base::BufferEncodingError;
pub use crate::parser::SyntaxError;

/// An engine/version selection the parser cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Engine tag outside the closed set of engines.
    #[error("unknown parser engine `{0}`; expected `classic` or `recovering`")]
    UnknownEngine(String),

    /// Version that is not a known Rill release.
    #[error("unknown Rill version: {0}")]
    UnknownVersion(String),

    /// Known engine and version that cannot be combined.
    #[error("parser engine `{engine}` does not support Rill {version}; supported: {supported}")]
    UnsupportedVersion {
        engine: &'static str,
        version: String,
        supported: String,
    },
}

/// Failure to produce a processed source from a file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
