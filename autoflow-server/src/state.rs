//! Shared server state: the in-memory working copy of the store document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use autoflow_core::store::{load_document, load_default_config, save_document};
use autoflow_core::types::Document;
use autoflow_core::StoreError;

use crate::error::ApiError;

/// One process-wide working copy of the persisted document, behind a mutex
/// so requests mutate it strictly one at a time (single-writer semantics;
/// there is no finer-grained locking to get wrong).
pub struct AppState {
    db_path: PathBuf,
    doc: Mutex<Document>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Load (or default) the document at `db_path`. When the loaded document
    /// carries no config, the bundled default pipeline at
    /// `default_config_path` is adopted and persisted immediately.
    pub fn open(db_path: PathBuf, default_config_path: &Path) -> Result<SharedState, StoreError> {
        let mut doc = load_document(&db_path);
        if doc.config.is_none() {
            doc.config = load_default_config(default_config_path);
            if doc.config.is_some() {
                tracing::info!(
                    config = %default_config_path.display(),
                    "no pipeline config in store, adopted bundled default",
                );
                save_document(&db_path, &doc)?;
            }
        }
        Ok(Arc::new(Self {
            db_path,
            doc: Mutex::new(doc),
        }))
    }

    /// Read-only access to the working copy.
    pub async fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let doc = self.doc.lock().await;
        f(&doc)
    }

    /// Run a mutating operation, then persist the whole document exactly
    /// once. A failed operation leaves the document unsaved; a failed save
    /// surfaces as a storage error on this request.
    pub async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut doc = self.doc.lock().await;
        let result = f(&mut doc)?;
        save_document(&self.db_path, &doc)?;
        Ok(result)
    }
}
