//! comics-core - Character records, validation rules and the catalog
//! repository.
//!
//! The repository is generic over a [`DocumentStore`], which persists the
//! whole collection as one document. Reports are rendered through a
//! [`ReportExporter`].

pub mod error;
pub mod record;
pub mod repository;
pub mod schema;
pub mod traits;
pub mod types;

pub use error::{Error, ReportError, StoreError, StoreErrorKind, ValidationError};
pub use record::{Aliados, Collection, NewRecord, Record, RecordPatch};
pub use repository::RecordRepository;
pub use schema::{SchemaValidator, ValidationMode};
pub use traits::{DocumentStore, LineStyle, ReportExporter, ReportLine, ReportTemplate};
pub use types::{Ciudad, RecordId, TIMESTAMP_FORMAT, TipoAliado, Timestamp};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
