//! Domain types for the AutoFlow pipeline.
//!
//! Everything here is serializable via serde + serde_json; the persisted
//! document and the HTTP wire format share these types, so serde attribute
//! choices (`flatten`, `untagged`, `skip_serializing_if`) define the on-disk
//! layout as much as the API payloads.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError};

/// Stage every new opportunity enters when no pipeline config is loaded.
pub const DEFAULT_ENTRY_STAGE: &str = "contacto";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(pub String);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed identifier for an opportunity record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OpportunityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OpportunityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Pipeline config
// ---------------------------------------------------------------------------

/// A single declared stage. Config files may carry extra presentation keys
/// (color, order hints); those round-trip through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Declaration of one submission field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form hint ("text", "tel", ...) — not interpreted by the engine.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Field declarations grouped by scope. Only `global` exists today.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default)]
    pub global: Vec<FieldDescriptor>,
}

/// The user-editable pipeline declaration: ordered stages plus field rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub fields: FieldSet,
}

impl PipelineConfig {
    /// Stage ids in declared order; the transition engine validates
    /// destination stages against this view.
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id.clone()).collect()
    }

    /// The default entry stage for new opportunities: first declared stage,
    /// or [`DEFAULT_ENTRY_STAGE`] when the stage list is empty.
    pub fn first_stage_id(&self) -> StageId {
        self.stages
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| StageId::from(DEFAULT_ENTRY_STAGE))
    }

    /// Global field descriptors marked `required`, in declared order.
    pub fn required_global_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields.global.iter().filter(|f| f.required).collect()
    }

    /// A config is valid when it declares at least one stage and stage ids
    /// are unique. This runs on every config replacement.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::MissingStages);
        }
        let mut seen = std::collections::HashSet::new();
        for stage in &self.stages {
            if !seen.insert(&stage.id) {
                return Err(ConfigError::DuplicateStage {
                    id: stage.id.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Opportunity
// ---------------------------------------------------------------------------

/// A submitted field value. Submissions are schema-less: any JSON scalar is
/// accepted and stored as-is (`untagged` keeps the wire format plain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Required-field semantics: `null` and the empty string count as absent.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Null) || matches!(self, FieldValue::Str(s) if s.is_empty())
    }

    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_owned())
    }
}

/// A tracked sales lead moving through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    /// Current stage id. Checked against the *current* config on `move`,
    /// never retroactively after a config change.
    pub stage: StageId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_at: Option<DateTime<Utc>>,
    /// Full submission payload, including keys no field descriptor declares.
    #[serde(default)]
    pub data: BTreeMap<String, FieldValue>,
}

// ---------------------------------------------------------------------------
// Store document + opportunity registry
// ---------------------------------------------------------------------------

/// Root of the persisted store: every mutation rewrites this whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub config: Option<PipelineConfig>,
}

impl Document {
    /// All opportunities in insertion order.
    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn find_opportunity(&self, id: &OpportunityId) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| &o.id == id)
    }

    /// Append at the end; insertion order is the only ordering the API offers.
    pub fn append_opportunity(&mut self, opportunity: Opportunity) {
        self.opportunities.push(opportunity);
    }

    /// Replace the record with matching `id` in place.
    pub fn replace_opportunity(
        &mut self,
        id: &OpportunityId,
        updated: Opportunity,
    ) -> Result<&Opportunity, RegistryError> {
        let idx = self
            .opportunities
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;
        self.opportunities[idx] = updated;
        Ok(&self.opportunities[idx])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
