//! Error types for regen-sync.

use std::path::PathBuf;

use thiserror::Error;

use regen_core::DocumentError;

/// All errors that can arise from synchronization and splicing.
///
/// "No directive found" and "no resolvable split invocation" are defined
/// nothing-to-do outcomes, not errors; they never appear here.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the document model.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// An I/O error outside the document model, with annotated path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `--subst` pattern that does not compile as a regular expression.
    #[error("invalid substitution pattern '{pattern}': {source}")]
    BadSubstitution {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The generation command exited non-zero. Carries its stderr verbatim;
    /// the document was left untouched.
    #[error("GENERATED-BY command failed:\n{stderr}")]
    GenerationFailed { command: String, stderr: String },

    /// More than one additional expectation prefix on a single invocation;
    /// explicitly unsupported rather than guessed at.
    #[error("at most one -verify-additional-prefix is supported")]
    AmbiguousAdditionalPrefix,

    /// Error message surfaced by the expectation-repair collaborator.
    #[error("{message}")]
    RepairFailed { message: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
