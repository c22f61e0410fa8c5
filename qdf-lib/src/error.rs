// Error types for filter parsing, corpus loading and the CLI umbrella.

use std::path::PathBuf;

/// Errors raised while parsing a filter string or building a clause.
///
/// Any of these aborts the whole filter; no partial result list is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("malformed range '{token}': {reason}")]
    MalformedRange { token: String, reason: String },

    #[error("malformed address '{clause}': {reason}")]
    MalformedAddress { clause: String, reason: String },

    #[error("a book number is required")]
    MissingBook,

    #[error("a verse number is required when specifying words")]
    WordWithoutVerse,
}

/// Errors raised while turning a document into a corpus tree.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("cannot read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus document: {reason}")]
    InvalidDocument { reason: String },
}

impl CorpusError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CorpusError::InvalidDocument { reason: reason.into() }
    }
}

/// Top-level error for front ends.
#[derive(Debug, thiserror::Error)]
pub enum QdfError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translated output needs a translation document")]
    MissingTranslation,
}
