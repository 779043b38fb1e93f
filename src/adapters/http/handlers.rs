//! HTTP handlers for the engagement API.
//!
//! These handlers connect Axum routes to the turn coordinator and the
//! session store. Every analyze request is tagged with a request id in the
//! trace output.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::application::{ProcessTurnCommand, ProcessTurnHandler};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct EngagementAppState {
    pub handler: ProcessTurnHandler,
    pub store: Arc<dyn SessionStore>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/analyze - process one scammer message
pub async fn analyze(
    State(state): State<EngagementAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id =
        SessionId::new(request.session_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let history = request
        .conversation_history
        .into_iter()
        .map(|m| m.into_transcript())
        .collect();

    let command = ProcessTurnCommand::new(session_id.clone(), request.message.text)
        .with_history(history);

    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        session_id = %session_id
    );
    let outcome = state.handler.process_turn(command).instrument(span).await;

    Ok(Json(AnalyzeResponse::from(outcome)))
}

/// GET /api/sessions/:id - session snapshot for diagnostics
pub async fn get_session(
    State(state): State<EngagementAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = SessionId::new(id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    match state.store.summary(&session_id).await {
        Some(summary) => Ok(Json(SessionResponse { session: summary })),
        None => Err(ApiError::NotFound(format!(
            "No session with id: {session_id}"
        ))),
    }
}

/// GET /health - liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

/// API-level errors with their HTTP mapping.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
