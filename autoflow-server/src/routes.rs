//! HTTP boundary: the `/api` route table and its handlers.
//!
//! Handlers are thin adapters — deserialize, delegate to the engine through
//! [`AppState`], serialize. All pipeline semantics live in autoflow-engine.

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use autoflow_core::types::{FieldValue, Opportunity, OpportunityId, PipelineConfig, StageId};
use autoflow_engine::{move_opportunity, set_config, submit};

use crate::error::ApiError;
use crate::state::SharedState;

/// Assemble the application router. When `web_dir` is given, unmatched paths
/// serve the static UI from that directory.
pub fn build_router(state: SharedState, web_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/config", get(get_config).post(replace_config))
        .route("/api/pipeline", get(get_pipeline))
        .route(
            "/api/opportunities",
            get(list_opportunities).post(create_opportunity),
        )
        .route("/api/opportunities/:id/move", patch(move_to_stage))
        .with_state(state);

    if let Some(dir) = web_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Current pipeline config, or `{}` when none has been saved.
async fn get_config(State(state): State<SharedState>) -> Json<Value> {
    let config = state.read(|doc| doc.config.clone()).await;
    match config {
        Some(config) => Json(json!(config)),
        None => Json(json!({})),
    }
}

async fn replace_config(
    State(state): State<SharedState>,
    Json(candidate): Json<PipelineConfig>,
) -> Result<Json<Value>, ApiError> {
    state
        .mutate(|doc| set_config(doc, candidate).map_err(ApiError::from))
        .await?;
    Ok(Json(json!({ "ok": true, "message": "config updated" })))
}

/// The declared stage list, or `[]` when no config is loaded.
async fn get_pipeline(State(state): State<SharedState>) -> Json<Value> {
    let stages = state
        .read(|doc| {
            doc.config
                .as_ref()
                .map(|c| c.stages.clone())
                .unwrap_or_default()
        })
        .await;
    Json(json!(stages))
}

async fn list_opportunities(State(state): State<SharedState>) -> Json<Vec<Opportunity>> {
    let all = state.read(|doc| doc.opportunities().to_vec()).await;
    Json(all)
}

async fn create_opportunity(
    State(state): State<SharedState>,
    Json(payload): Json<BTreeMap<String, FieldValue>>,
) -> Result<(StatusCode, Json<Opportunity>), ApiError> {
    let record = state
        .mutate(|doc| submit(doc, payload).map_err(ApiError::from))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    to_stage: StageId,
}

async fn move_to_stage(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<MoveRequest>,
) -> Result<Json<Opportunity>, ApiError> {
    let id = OpportunityId::from(id);
    let record = state
        .mutate(|doc| move_opportunity(doc, &id, body.to_stage).map_err(ApiError::from))
        .await?;
    Ok(Json(record))
}
