//! JSON document store.
//!
//! The whole collection lives in one file shaped as
//! `{ "<collection key>": [ <record>, ... ] }`. Writers coordinate through
//! an advisory lock on a sibling `<document>.lock` file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use comics_core::error::StoreError;
use comics_core::{Collection, DocumentStore};

/// Wrapper key used when none is configured.
pub const DEFAULT_COLLECTION_KEY: &str = "personajes_dc";

/// Filesystem-backed document store.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
    key: String,
}

impl FileDocumentStore {
    /// Create a store for the document at `path` under the default key.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_key(path, DEFAULT_COLLECTION_KEY)
    }

    /// Create a store for the document at `path` under `key`.
    pub fn with_key(path: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Get the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the wrapper key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sibling of the document named `<document><suffix>`.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Lock file shared by every writer of the document.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    /// Fresh sibling file a write goes through before it replaces the
    /// document. Unique per write so concurrent writers never share one.
    fn temp_path(&self) -> PathBuf {
        self.sibling(&format!(".{}.tmp", Uuid::new_v4().simple()))
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Create the document with an empty collection if it does not exist.
    ///
    /// Returns `true` when a new document was written. An existing document
    /// is never touched, even if it is malformed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn init(&self) -> Result<bool, StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| self.write_error(e))?;
        if exists {
            return Ok(false);
        }

        let _document = self.lock().await?;
        if fs::try_exists(&self.path)
            .await
            .map_err(|e| self.write_error(e))?
        {
            return Ok(false);
        }
        self.write(&Collection::default()).await?;
        debug!("Initialized empty document");

        Ok(true)
    }
}

/// Exclusive advisory lock on a document's lock file.
///
/// Released when dropped.
#[derive(Debug)]
pub struct DocumentLock {
    file: File,
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!(error = %e, "Failed to release document lock");
        }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    type Guard = DocumentLock;

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn lock(&self) -> Result<DocumentLock, StoreError> {
        let lock_path = self.lock_path();
        let lock_error = |source: std::io::Error| StoreError::Lock {
            path: lock_path.clone(),
            source,
        };

        let blocking_path = lock_path.clone();
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<File> {
            if let Some(parent) = blocking_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(&blocking_path)?;
            file.lock_exclusive()?;
            Ok(file)
        })
        .await
        .map_err(|e| lock_error(std::io::Error::other(e)))?
        .map_err(lock_error)?;

        debug!("Acquired document lock");

        Ok(DocumentLock { file })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read(&self) -> Result<Collection, StoreError> {
        let content = fs::read(&self.path).await.map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut document: Map<String, Value> =
            serde_json::from_slice(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let records = document
            .remove(&self.key)
            .ok_or_else(|| StoreError::MissingKey {
                path: self.path.clone(),
                key: self.key.clone(),
            })?;

        let collection: Collection =
            serde_json::from_value(records).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(records = collection.len(), "Read document");

        Ok(collection)
    }

    #[instrument(skip(self, collection), fields(path = %self.path.display()))]
    async fn write(&self, collection: &Collection) -> Result<(), StoreError> {
        let mut document = Map::new();
        document.insert(
            self.key.clone(),
            serde_json::to_value(collection).map_err(StoreError::Encode)?,
        );
        let content = serde_json::to_vec(&document).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(self.write_error(e));
        }

        debug!(records = collection.len(), "Wrote document");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comics_core::StoreErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    fn bruce() -> Value {
        json!({
            "id": 1,
            "nombre": "Bruce Wayne",
            "edad": 35,
            "ciudad": "Gotham",
            "poderes": ["riqueza"],
            "aliados": {"nombre": ["Alfred"], "tipo": "Humanos"},
            "enemigos": ["Joker"],
            "primera_aparicion": "Detective Comics 27",
            "hobbies": ["detective"],
            "activo": true,
            "created_at": "2024-05-01 12:30",
            "alias": "Batman"
        })
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(dir.path().join("db.json"));

        let err = store.read().await.unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Io);
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileDocumentStore::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_missing_key_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{"otros": []}"#).unwrap();

        let err = FileDocumentStore::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StoreError::MissingKey { .. }));
        assert_eq!(err.kind(), StoreErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_zero_id_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let mut record = bruce();
        record["id"] = json!(0);
        std::fs::write(&path, json!({"personajes_dc": [record]}).to_string()).unwrap();

        let err = FileDocumentStore::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_round_trip_preserves_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let original = json!({ "personajes_dc": [bruce()] });
        std::fs::write(&path, original.to_string()).unwrap();

        let store = FileDocumentStore::new(&path);
        let collection = store.read().await.unwrap();
        store.write(&collection).await.unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, original);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "db.json")
            .collect();
        assert!(leftovers.is_empty(), "stray files: {:?}", leftovers);
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let store = FileDocumentStore::new("data/db.json");
        let first = store.temp_path();
        let second = store.temp_path();

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(Path::new("data")));
        assert!(first.to_string_lossy().ends_with(".tmp"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_lock_excludes_second_holder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let first = FileDocumentStore::new(&path);
        let second = FileDocumentStore::new(&path);

        let guard = first.lock().await.unwrap();
        assert!(first.lock_path().exists());

        let waiter = tokio::spawn(async move { second.lock().await.map(|_| ()) });
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_custom_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let store = FileDocumentStore::with_key(&path, "heroes");

        store.write(&Collection::default()).await.unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({"heroes": []}));
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_creates_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("db.json");
        let store = FileDocumentStore::new(&path);

        assert!(store.init().await.unwrap());
        assert!(store.read().await.unwrap().is_empty());

        std::fs::write(&path, json!({"personajes_dc": [bruce()]}).to_string()).unwrap();
        assert!(!store.init().await.unwrap());
        assert_eq!(store.read().await.unwrap().len(), 1);
    }
}
