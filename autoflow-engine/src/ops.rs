//! Transition engine: the operations that create and advance opportunities.
//!
//! These are the canonical entrypoints shared by the HTTP server and tests.
//! They mutate a [`Document`] in memory and leave persistence to the caller,
//! which saves the whole document exactly once per successful operation.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use autoflow_core::types::{
    Document, FieldValue, Opportunity, OpportunityId, PipelineConfig, StageId,
};
use autoflow_core::ConfigError;

use crate::error::EngineError;

/// Keys of a submission payload that the engine itself interprets. They are
/// still stored in `data` alongside everything else.
const STAGE_KEY: &str = "stage";
const TITLE_KEY: &str = "title";

/// Create a new opportunity from a submission payload.
///
/// Validation stops at the first required global field whose value is
/// absent, null, or empty. The initial stage is taken from the payload when
/// supplied, otherwise from the first configured stage; by product decision
/// the chosen stage is *not* checked against the stage list here — only
/// [`move_opportunity`] enforces stage validity.
pub fn submit(
    doc: &mut Document,
    payload: BTreeMap<String, FieldValue>,
) -> Result<Opportunity, EngineError> {
    let config = doc.config.clone().unwrap_or_default();

    for field in config.required_global_fields() {
        match payload.get(&field.key) {
            Some(value) if !value.is_empty() => {}
            _ => {
                return Err(EngineError::MissingField {
                    key: field.key.clone(),
                })
            }
        }
    }

    let stage = payload
        .get(STAGE_KEY)
        .and_then(FieldValue::as_str)
        .filter(|s| !s.is_empty())
        .map(StageId::from)
        .unwrap_or_else(|| config.first_stage_id());

    let opportunity = Opportunity {
        id: OpportunityId(short_id()),
        title: derive_title(&payload),
        stage,
        created_at: Utc::now(),
        moved_at: None,
        data: payload,
    };

    doc.append_opportunity(opportunity.clone());
    Ok(opportunity)
}

/// Move an opportunity to another configured stage.
///
/// Stage validity is checked before the record lookup, so an unknown id
/// combined with an unknown stage reports the stage error. Direction is
/// unrestricted: backward moves, stage skips, and re-entering the current
/// stage are all legal transitions.
pub fn move_opportunity(
    doc: &mut Document,
    id: &OpportunityId,
    to_stage: StageId,
) -> Result<Opportunity, EngineError> {
    let stage_ids = doc
        .config
        .as_ref()
        .map(PipelineConfig::stage_ids)
        .unwrap_or_default();
    if !stage_ids.contains(&to_stage) {
        return Err(EngineError::InvalidStage { stage: to_stage });
    }

    let mut updated = doc
        .find_opportunity(id)
        .cloned()
        .ok_or_else(|| EngineError::NotFound { id: id.clone() })?;
    updated.stage = to_stage;
    updated.moved_at = Some(Utc::now());

    let stored = doc.replace_opportunity(id, updated)?;
    Ok(stored.clone())
}

/// Replace the pipeline config wholesale after validating the candidate.
///
/// Existing opportunities are left untouched: a record whose stage vanished
/// from the new stage list simply stays on its old stage id.
pub fn set_config(doc: &mut Document, candidate: PipelineConfig) -> Result<(), ConfigError> {
    candidate.ensure_valid()?;
    doc.config = Some(candidate);
    Ok(())
}

/// Short opaque id for a new opportunity (8 hex chars of a v4 uuid).
fn short_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_owned()
}

/// Display title: the submitted `title` if present, otherwise derived from
/// the dealership fields with placeholder fallbacks.
fn derive_title(payload: &BTreeMap<String, FieldValue>) -> String {
    if let Some(title) = payload.get(TITLE_KEY).and_then(FieldValue::as_str) {
        if !title.is_empty() {
            return title.to_owned();
        }
    }
    let nombre = payload
        .get("nombre_cliente")
        .and_then(FieldValue::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Cliente");
    let modelo = payload
        .get("modelo_interes")
        .and_then(FieldValue::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Modelo");
    format!("{nombre} — {modelo}")
}

// ---------------------------------------------------------------------------
// Unit tests (helper-level; operation behavior is covered in tests/)
// ---------------------------------------------------------------------------
