//! REST API handlers for the control center.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use pcc_core::clock;
use pcc_core::logging::{LogEntry, LogKind};
use pcc_core::pipeline::{PipelineState, StageUpdate};
use pcc_core::topics::{QueueDocument, Topic, TopicResult, TopicStore};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// Run a topic store call on the blocking pool.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&TopicStore) -> TopicResult<T> + Send + 'static,
{
    let center = Arc::clone(&state.center);
    let result = tokio::task::spawn_blocking(move || f(center.topics()))
        .await
        .map_err(|e| AppError::Internal(format!("Topic store task failed: {}", e)))?;
    Ok(result?)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Non-numeric ids never match a route.
fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("Not found".to_string()))
}

/// Health check endpoint
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let pipeline = state.center.pipeline().snapshot();
    Json(json!({
        "status": "ok",
        "pipeline_running": pipeline.running(),
        "current_topic": pipeline.current_topic(),
        "timestamp": clock::iso_now(),
    }))
}

pub async fn list_topics(State(state): State<AppState>) -> ApiResult<QueueDocument> {
    let doc = with_store(&state, |store| store.load()).await?;
    Ok(Json(doc))
}

pub async fn get_topic(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Topic> {
    let id = path_id(id)?;
    let topic = with_store(&state, move |store| store.get_topic(id)).await?;
    Ok(Json(topic))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

pub async fn update_topic_status(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    let req = body(payload)?;

    let topic = with_store(&state, move |store| store.set_topic_status(id, &req.status)).await?;

    Ok(Json(json!({
        "success": true,
        "topic": topic,
    })))
}

#[derive(Deserialize)]
pub struct StartRequest {
    pub topic_id: i64,
}

pub async fn start_pipeline(
    State(state): State<AppState>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body(payload)?;
    state.center.pipeline().start(req.topic_id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Pipeline started",
        "topic_id": req.topic_id,
    })))
}

pub async fn stop_pipeline(State(state): State<AppState>) -> ApiResult<Value> {
    state.center.pipeline().stop()?;

    Ok(Json(json!({
        "success": true,
        "message": "Pipeline stopped",
    })))
}

pub async fn pipeline_status(State(state): State<AppState>) -> Json<PipelineState> {
    Json(state.center.pipeline().snapshot())
}

#[derive(Deserialize)]
pub struct StageRequest {
    pub status: String,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub details: String,
}

pub async fn update_stage(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StageRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    let req = body(payload)?;

    let update = StageUpdate::new(req.status)
        .progress(req.progress)
        .details(req.details);
    let stage = state.center.pipeline().update_stage(id, update)?;

    Ok(Json(json!({
        "success": true,
        "stage": stage,
    })))
}

#[derive(Deserialize)]
pub struct LogsQuery {
    /// Kept raw so a bad value falls back to the default instead of failing.
    pub limit: Option<String>,
}

impl LogsQuery {
    fn limit_or(&self, default: usize) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(default)
    }
}

pub async fn list_logs(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Json<Value> {
    let limit = match query {
        Ok(Query(query)) => query.limit_or(state.default_tail),
        Err(_) => state.default_tail,
    };

    Json(json!({
        "logs": state.center.log().tail(limit),
    }))
}

pub async fn clear_logs(State(state): State<AppState>) -> Json<Value> {
    state.center.log().clear();

    Json(json!({
        "success": true,
        "message": "Logs cleared",
    }))
}

#[derive(Deserialize)]
pub struct LogRequest {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: LogKind,
}

pub async fn add_log(
    State(state): State<AppState>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body(payload)?;
    let entry: LogEntry = state.center.log().append(req.message, req.kind);

    Ok(Json(json!({
        "success": true,
        "log": entry,
    })))
}

pub async fn export_topics(State(state): State<AppState>) -> ApiResult<QueueDocument> {
    let doc = with_store(&state, |store| store.export()).await?;
    Ok(Json(doc))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
