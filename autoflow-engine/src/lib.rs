//! # autoflow-engine
//!
//! The opportunity state machine: submission, stage moves, and config
//! replacement over an in-memory store document.
//!
//! Call [`submit`] to create an opportunity, [`move_opportunity`] to advance
//! (or rewind) one, and [`set_config`] to replace the pipeline declaration.

pub mod error;
pub mod ops;

pub use error::EngineError;
pub use ops::{move_opportunity, set_config, submit};
