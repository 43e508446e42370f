//! comics-file - Filesystem-backed storage for the comics catalog.

mod access_log;
mod store;

pub use access_log::{AccessEntry, AccessLog};
pub use store::{DEFAULT_COLLECTION_KEY, DocumentLock, FileDocumentStore};
