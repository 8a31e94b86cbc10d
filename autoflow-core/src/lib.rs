//! AutoFlow core library — domain types, pipeline config model, opportunity
//! registry, and whole-document persistence.
//!
//! Public API surface:
//! - [`types`] — newtypes, config model, opportunity, store document
//! - [`error`] — [`StoreError`], [`ConfigError`], [`RegistryError`]
//! - [`store`] — load / save / bundled default config

pub mod error;
pub mod store;
pub mod types;

pub use error::{ConfigError, RegistryError, StoreError};
pub use types::{
    Document, FieldDescriptor, FieldSet, FieldValue, Opportunity, OpportunityId, PipelineConfig,
    Stage, StageId, DEFAULT_ENTRY_STAGE,
};
