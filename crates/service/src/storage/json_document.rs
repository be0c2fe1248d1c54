use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Top-level JSON object persisted on disk.
pub type Document = Map<String, Value>;

/// Single JSON document on disk used as the site database.
///
/// Nothing is cached between calls: every read loads the file again and every
/// mutation rewrites it in full. Mutations run through [`transact`], which
/// holds an async mutex for the whole read-mutate-write cycle so concurrent
/// requests in this process cannot overwrite each other's changes.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target.
///
/// [`transact`]: JsonDocumentStore::transact
pub struct JsonDocumentStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDocumentStore {
    /// Open an existing document. A missing or unparsable file is an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = Self { file_path: path.into(), write_lock: Mutex::new(()) };
        store.load().await?;
        info!(path = %store.file_path.display(), "json document opened");
        Ok(Arc::new(store))
    }

    /// Open the document, writing `seed` first when the file does not exist.
    pub async fn open_or_seed<P, F>(path: P, seed: F) -> Result<Arc<Self>, ServiceError>
    where
        P: Into<PathBuf>,
        F: FnOnce() -> Document,
    {
        let file_path = path.into();
        if fs::metadata(&file_path).await.is_err() {
            if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
            write_atomic(&file_path, &seed()).await?;
            info!(path = %file_path.display(), "seeded new json document");
        }
        Self::open(file_path).await
    }

    /// Read the whole document from disk.
    pub async fn load(&self) -> Result<Document, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| {
            ServiceError::Storage(format!("cannot read {}: {e}", self.file_path.display()))
        })?;
        let doc: Document = serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("cannot parse {}: {e}", self.file_path.display()))
        })?;
        debug!(path = %self.file_path.display(), fields = doc.len(), "json document loaded");
        Ok(doc)
    }

    /// Load, apply `f`, and persist the result as one serialised step.
    ///
    /// When `f` returns an error the file is left untouched.
    pub async fn transact<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Document) -> Result<T, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        let out = f(&mut doc)?;
        write_atomic(&self.file_path, &doc).await?;
        Ok(out)
    }
}

async fn write_atomic(path: &Path, doc: &Document) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(doc).map_err(ServiceError::storage)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data).await.map_err(|e| {
        ServiceError::Storage(format!("cannot write {}: {e}", tmp_path.display()))
    })?;
    fs::rename(&tmp_path, path).await.map_err(|e| {
        ServiceError::Storage(format!("cannot replace {}: {e}", path.display()))
    })?;
    Ok(())
}
