//! Error types for autoflow-engine.

use thiserror::Error;

use autoflow_core::types::{OpportunityId, StageId};

/// Validation and lookup failures from the transition engine. These are
/// request-level errors: the caller reports them and moves on, nothing here
/// is process-fatal.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required global field is absent, null, or empty in the submission.
    #[error("missing required field: {key}")]
    MissingField { key: String },

    /// The destination stage is not declared in the current pipeline config.
    #[error("invalid destination stage: {stage}")]
    InvalidStage { stage: StageId },

    /// No opportunity with the given id exists.
    #[error("opportunity not found: {id}")]
    NotFound { id: OpportunityId },
}

impl From<autoflow_core::RegistryError> for EngineError {
    fn from(err: autoflow_core::RegistryError) -> Self {
        match err {
            autoflow_core::RegistryError::NotFound { id } => EngineError::NotFound { id },
        }
    }
}
