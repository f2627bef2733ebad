//! Error types for regen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`DocumentError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DocumentError {
    DocumentError::Io {
        path: path.into(),
        source,
    }
}
