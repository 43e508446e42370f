//! Document store trait.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::Collection;

/// Persists the whole collection as a single document.
///
/// The unit of I/O is always the full collection. Implementations must make
/// every successful `write` visible to the next `read`.
///
/// Writers sharing a document, in this process or another one, serialize
/// their read-modify-write cycles through [`DocumentStore::lock`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Held while a read-modify-write is in progress; released on drop.
    type Guard: Send;

    /// Wait for exclusive write access to the document.
    async fn lock(&self) -> Result<Self::Guard, StoreError>;

    /// Load every record, in document order.
    async fn read(&self) -> Result<Collection, StoreError>;

    /// Replace the document's contents with `collection`.
    async fn write(&self, collection: &Collection) -> Result<(), StoreError>;
}
