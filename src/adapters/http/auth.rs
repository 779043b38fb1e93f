//! API key middleware for axum.
//!
//! Validates the `x-api-key` header against the configured shared key. When
//! no key is configured (development) every request passes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::config::AuthConfig;

use super::dto::ErrorResponse;

/// Rejects requests without the configured API key.
pub async fn api_key_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    if !auth.requires_key() {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok());

    match presented {
        Some(key) if auth.key_matches(key) => next.run(request).await,
        Some(_) => {
            warn!("request with invalid API key rejected");
            unauthorized("Invalid API key")
        }
        None => unauthorized("Missing x-api-key header"),
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
}
