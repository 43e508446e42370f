//! Character records and the collection they live in.
//!
//! The actual catalog operations are methods on
//! [`RecordRepository`](crate::RecordRepository).

mod collection;
mod types;

pub use collection::Collection;
pub use types::{Aliados, NewRecord, Record, RecordPatch};
