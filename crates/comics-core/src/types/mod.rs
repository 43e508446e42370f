//! Value types for character records.
//!
//! The closed sets (`Ciudad`, `TipoAliado`) and record identity are checked
//! at construction time; timestamps are kept as their formatted text.

mod ciudad;
mod record_id;
mod timestamp;
mod tipo_aliado;

pub use ciudad::Ciudad;
pub use record_id::RecordId;
pub use timestamp::{TIMESTAMP_FORMAT, Timestamp};
pub use tipo_aliado::TipoAliado;
