//! Error types for autoflow-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{OpportunityId, StageId};

/// Errors from reading or writing the persisted store document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path only; load degrades instead).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}

/// Validation failures on a candidate pipeline config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `stages` is absent or empty — the config declares no pipeline at all.
    #[error("invalid config: missing stages")]
    MissingStages,

    /// The same stage id is declared more than once.
    #[error("invalid config: duplicate stage id '{id}'")]
    DuplicateStage { id: StageId },
}

/// Errors from the opportunity registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No opportunity with the given id exists.
    #[error("opportunity not found: {id}")]
    NotFound { id: OpportunityId },
}
