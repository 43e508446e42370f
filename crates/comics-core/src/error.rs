//! Error types for the comics catalog.
//!
//! Validation failures are expected outcomes carried as data; store and
//! report failures are infrastructure errors the caller surfaces opaquely.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The candidate record or patch was rejected by the rule set.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backing document could not be read, parsed or written.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The report could not be rendered into its sink.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// A value failed to parse into one of the catalog's types.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// One or more field-level validation messages.
///
/// Never empty. In fail-fast mode it holds exactly one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub(crate) fn new(messages: Vec<String>) -> Self {
        debug_assert!(!messages.is_empty());
        Self { messages }
    }

    /// The messages in the order the fields were checked.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Broad classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The document could not be read or written.
    Io,
    /// The document exists but its content is not a valid collection.
    Parse,
}

/// Errors from loading or persisting the collection document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the document failed (including a missing file).
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the document failed.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON or a record has the wrong shape.
    #[error("malformed document '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document's write lock could not be taken.
    #[error("failed to lock '{}': {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document parsed but the wrapper key is absent.
    #[error("document '{}' has no '{key}' collection", path.display())]
    MissingKey { path: PathBuf, key: String },

    /// The collection could not be serialized.
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Classify the error as an I/O or a parse failure.
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Read { .. } | StoreError::Write { .. } | StoreError::Lock { .. } => {
                StoreErrorKind::Io
            }
            StoreError::Parse { .. } | StoreError::MissingKey { .. } | StoreError::Encode(_) => {
                StoreErrorKind::Parse
            }
        }
    }
}

/// Errors from rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The sink rejected a write.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// The renderer could not lay out the document.
    #[error("failed to render report: {message}")]
    Render { message: String },
}

/// Input parsing errors for the catalog's value types.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record id.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Unknown city.
    #[error("invalid ciudad '{value}': must be one of [{allowed}]")]
    Ciudad { value: String, allowed: String },

    /// Unknown ally kind.
    #[error("invalid aliados.tipo '{value}': must be one of [{allowed}]")]
    TipoAliado { value: String, allowed: String },
}
