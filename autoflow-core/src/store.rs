//! Whole-document JSON persistence.
//!
//! # Storage layout
//!
//! ```text
//! <data_dir>/
//!   db.json    ({ "opportunities": [...], "config": {...} })
//! ```
//!
//! The store is deliberately coarse: every mutating operation rewrites the
//! full document. Reads that fail (missing file, corrupt JSON) degrade to an
//! empty default document instead of failing the process.
//!
//! # API pattern
//!
//! All functions take explicit paths; callers (and tests, via `TempDir`)
//! decide where the data lives. Nothing here touches the home directory.

use std::path::Path;

use crate::error::{io_err, StoreError};
use crate::types::{Document, PipelineConfig};

/// File name of the store document inside the data directory.
pub const DB_FILE: &str = "db.json";

/// Load the store document from `path`.
///
/// Missing file and unparseable contents both yield `Document::default()`;
/// a parse failure is logged at warn level since it usually means a
/// hand-edited file, not a programming error.
pub fn load_document(path: &Path) -> Document {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return Document::default(),
    };
    match serde_json::from_str(&contents) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "store document unparseable, starting from empty document",
            );
            Document::default()
        }
    }
}

/// Atomically save the document to `path`.
///
/// Write flow: serialize (pretty, human-readable) → `.tmp` sibling →
/// `rename`. The `.tmp` sibling lives in the target directory so the rename
/// never crosses filesystems.
pub fn save_document(path: &Path, document: &Document) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(&tmp_path, json).map_err(|e| io_err(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Load the bundled default pipeline config (used only when the store has
/// never had a config saved). `None` on missing or corrupt file.
pub fn load_default_config(path: &Path) -> Option<PipelineConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "default pipeline config unparseable, ignoring",
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
