//! API route handlers

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use engine::{EngineStats, IngestOutcome, PatternResult, QueryOutcome};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub series_key: String,
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub series_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<PatternResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-client-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string()
}

pub async fn ingest_observation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<IngestRequest>,
) -> (StatusCode, Json<IngestResponse>) {
    let client = client_id(&headers);
    match state
        .engine
        .ingest(&client, &req.series_key, req.timestamp, req.value)
    {
        IngestOutcome::Accepted {
            series_key,
            window_len,
            detection,
        } => (
            StatusCode::OK,
            Json(IngestResponse {
                status: "accepted",
                series_key,
                window_len: Some(window_len),
                detection,
                reason: None,
            }),
        ),
        IngestOutcome::Rejected(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(IngestResponse {
                status: "rejected",
                series_key: req.series_key,
                window_len: None,
                detection: None,
                reason: Some(error.to_string()),
            }),
        ),
        IngestOutcome::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(IngestResponse {
                status: "rate_limited",
                series_key: req.series_key,
                window_len: None,
                detection: None,
                reason: None,
            }),
        ),
    }
}

pub async fn query_pattern(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(series): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let client = client_id(&headers);
    match state.engine.query(&client, &series) {
        QueryOutcome::Found(result) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "result": result })),
        ),
        QueryOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "status": "not_found",
                "series_key": series,
            })),
        ),
        QueryOutcome::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "status": "rate_limited" })),
        ),
    }
}

pub async fn engine_stats(State(state): State<AppState>) -> Json<EngineStats> {
    Json(state.engine.stats())
}
