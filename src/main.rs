//! Honeypot engagement service entrypoint.
//!
//! Loads configuration, wires the in-memory store, the offline capability
//! adapters and the report delivery pipeline into the turn coordinator, and
//! serves the HTTP API.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use scambait::adapters::http::EngagementAppState;
use scambait::adapters::{
    HttpEndpointConfig, HttpReportEndpoint, InMemorySessionStore, KeywordClassifier,
    ReportDelivery, TemplateResponder,
};
use scambait::adapters::http::engagement_router;
use scambait::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let store = Arc::new(InMemorySessionStore::new());

    let endpoint = HttpReportEndpoint::new(
        HttpEndpointConfig::new(config.delivery.callback_url.clone())
            .with_timeout(config.delivery.schedule().attempt_timeout),
    )?;
    let delivery = Arc::new(
        ReportDelivery::new(Arc::new(endpoint)).with_schedule(config.delivery.schedule()),
    );

    let handler = scambait::application::ProcessTurnHandler::new(
        store.clone(),
        Arc::new(KeywordClassifier::new()),
        Arc::new(TemplateResponder::new()),
        delivery,
    )
    .with_policy(config.engagement.policy())
    .with_capability_timeout(config.engagement.capability_timeout());

    let state = EngagementAppState {
        handler,
        store: store.clone(),
    };
    let app = engagement_router(state, config.auth.clone(), config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "starting engagement service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
