//! HTTP adapter: the axum surface over the turn coordinator.

mod auth;
mod dto;
mod handlers;
mod routes;

pub use dto::{AnalyzeRequest, AnalyzeResponse, EngagementMetrics, ErrorResponse, MessageDto};
pub use handlers::EngagementAppState;
pub use routes::engagement_router;
