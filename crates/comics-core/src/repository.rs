//! Catalog operations over a document store.
//!
//! Every operation re-reads the whole document. Mutations hold the
//! repository's write lock and the store's document lock from the read
//! until the write has landed, so two mutations never interleave their
//! read-modify-write cycles, even across repositories sharing a document.

use std::io::Write;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::Result;
use crate::record::Record;
use crate::schema::{SchemaValidator, ValidationMode};
use crate::traits::{DocumentStore, ReportExporter, ReportTemplate};
use crate::types::{RecordId, Timestamp};

/// Record catalog backed by a [`DocumentStore`].
#[derive(Debug)]
pub struct RecordRepository<S> {
    store: S,
    validator: SchemaValidator,
    write_lock: Mutex<()>,
}

impl<S: DocumentStore> RecordRepository<S> {
    /// Create a repository over `store` with the comic rule set.
    pub fn new(store: S) -> Self {
        Self {
            store,
            validator: SchemaValidator::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the rule set records are checked against.
    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// List records, optionally only those whose `ciudad` matches
    /// `ciudad` ignoring case. An empty filter lists everything.
    #[instrument(skip(self))]
    pub async fn list(&self, ciudad: Option<&str>) -> Result<Vec<Record>> {
        let collection = self.store.read().await?;
        let records = match ciudad.filter(|c| !c.is_empty()) {
            Some(ciudad) => collection.filter_ciudad(ciudad),
            None => collection.into_records(),
        };
        Ok(records)
    }

    /// Fetch a record by id. `None` when no record has that id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: RecordId) -> Result<Option<Record>> {
        let collection = self.store.read().await?;
        Ok(collection.find(id).cloned())
    }

    /// Validate and append a new record.
    ///
    /// The id is the collection length plus one, so it can repeat an id
    /// still in use after a deletion.
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: &Value, mode: ValidationMode) -> Result<Record> {
        let new = self.validator.validate_new(candidate, mode)?;

        let _guard = self.write_lock.lock().await;
        let _document = self.store.lock().await?;
        let mut collection = self.store.read().await?;

        let record = new.into_record(collection.next_id(), Timestamp::now());
        collection.push(record.clone());
        self.store.write(&collection).await?;

        debug!(id = %record.id, "Created record");

        Ok(record)
    }

    /// Validate `patch` and merge it into the record with `id`.
    ///
    /// Returns `None` without writing when no record has that id.
    /// `created_at` is re-stamped on every successful update.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: RecordId,
        patch: &Value,
        mode: ValidationMode,
    ) -> Result<Option<Record>> {
        let patch = self.validator.validate_patch(patch, mode)?;

        let _guard = self.write_lock.lock().await;
        let _document = self.store.lock().await?;
        let mut collection = self.store.read().await?;

        let Some(record) = collection.find_mut(id) else {
            debug!("No record to update");
            return Ok(None);
        };
        patch.apply_to(record);
        record.created_at = Some(Timestamp::now());
        let merged = record.clone();

        self.store.write(&collection).await?;

        debug!(id = %merged.id, "Updated record");

        Ok(Some(merged))
    }

    /// Remove the record with `id`. Succeeds whether or not it existed;
    /// returns whether anything was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let _document = self.store.lock().await?;
        let mut collection = self.store.read().await?;

        let removed = collection.remove(id);
        self.store.write(&collection).await?;

        debug!(removed, "Deleted record");

        Ok(removed > 0)
    }

    /// Back-fill `updated_at` on every record that lacks it.
    ///
    /// Already stamped records are left alone. The collection is written
    /// even when nothing changed. Returns the number of records stamped.
    #[instrument(skip(self))]
    pub async fn stamp_updated_at(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let _document = self.store.lock().await?;
        let mut collection = self.store.read().await?;

        let now = Timestamp::now();
        let mut stamped = 0;
        for record in collection.iter_mut().filter(|r| r.updated_at.is_none()) {
            record.updated_at = Some(now.clone());
            stamped += 1;
        }
        self.store.write(&collection).await?;

        debug!(stamped, "Stamped updated_at");

        Ok(stamped)
    }

    /// Render the whole collection, in order, through `exporter`.
    #[instrument(skip_all)]
    pub async fn export(
        &self,
        exporter: &dyn ReportExporter,
        template: &ReportTemplate,
        sink: &mut (dyn Write + Send),
    ) -> Result<()> {
        let collection = self.store.read().await?;
        let count = collection.len();
        exporter.export(template, &mut collection.into_iter(), sink)?;

        debug!(count, "Exported report");

        Ok(())
    }
}
