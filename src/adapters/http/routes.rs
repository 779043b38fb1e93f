//! Route configuration for the engagement API.
//!
//! Routes:
//! - `POST /api/analyze` - process one scammer message
//! - `GET /api/sessions/:id` - session snapshot
//! - `GET /health` - liveness probe (not behind the API key)

use std::time::Duration;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AuthConfig;

use super::auth::api_key_middleware;
use super::handlers::{analyze, get_session, health, EngagementAppState};

/// Builds the full application router.
///
/// `request_timeout` bounds total per-request processing; a request that
/// outlives it is answered with 408.
pub fn engagement_router(
    state: EngagementAppState,
    auth: AuthConfig,
    request_timeout: Duration,
) -> Router {
    let api = Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/sessions/:id", get(get_session))
        .layer(middleware::from_fn_with_state(auth, api_key_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
