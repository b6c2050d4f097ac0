//! HTTP webhook hosting the skill.
//!
//! - `POST /skill`: request envelope in, response envelope out
//! - `GET /health`: liveness
//! - `GET /metrics`: dispatch counters

use crate::config::Config;
use crate::envelope::RequestEnvelope;
use crate::metrics::MetricsReport;
use crate::response::ResponseEnvelope;
use crate::security::{verify_api_key, verify_skill_id};
use crate::skill::Skill;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Header carrying the shared secret when `SKILL_API_KEY` is set.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(skill: Skill, config: Config) -> Self {
        Self {
            skill: Arc::new(skill),
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/skill", post(handle_skill_request))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_skill_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let provided_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !verify_api_key(state.config.skill_api_key.as_deref(), provided_key) {
        warn!("Rejected request with missing or invalid API key");
        return Err(AppError::Unauthorized);
    }

    let envelope: RequestEnvelope = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request envelope: {}", e)))?;

    if !verify_skill_id(state.config.skill_id.as_deref(), envelope.application_id()) {
        warn!(
            application_id = envelope.application_id().unwrap_or("-"),
            "Rejected request for another skill"
        );
        return Err(AppError::Forbidden);
    }

    let response = state.skill.dispatch(&envelope).map_err(|e| {
        error!(
            request_id = envelope.request_id().unwrap_or("-"),
            "Dispatch failed: {}", e
        );
        AppError::Internal(e.to_string())
    })?;

    Ok(Json(response.to_envelope()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.skill.metrics().report())
}

// ==================== Error Handling ====================

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unauthorized,
    Forbidden,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Request is not addressed to this skill".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
