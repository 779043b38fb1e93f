//! HTTP Report Endpoint - posts final reports to the external collector.
//!
//! Performs exactly one POST per `send` call; the retry schedule lives in
//! [`ReportDelivery`](super::ReportDelivery), not here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpEndpointConfig::new("https://collector.example.com/api/updateHoneyPotFinalResult")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let endpoint = HttpReportEndpoint::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use tracing::debug;

use crate::ports::{DeliveryError, FinalReport, ReportEndpoint};

/// Configuration for the HTTP report endpoint.
#[derive(Debug, Clone)]
pub struct HttpEndpointConfig {
    /// Fully-qualified URL the report is posted to.
    pub callback_url: String,
    /// Optional API key sent as `x-api-key`.
    api_key: Option<Secret<String>>,
    /// Request timeout for a single POST.
    pub timeout: Duration,
}

impl HttpEndpointConfig {
    /// Creates a configuration pointing at the given callback URL.
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`ReportEndpoint`] backed by a reqwest client.
pub struct HttpReportEndpoint {
    config: HttpEndpointConfig,
    client: Client,
}

impl HttpReportEndpoint {
    /// Creates an endpoint with the given configuration.
    pub fn new(config: HttpEndpointConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::network(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ReportEndpoint for HttpReportEndpoint {
    async fn send(&self, report: &FinalReport) -> Result<(), DeliveryError> {
        let mut request = self
            .client
            .post(&self.config.callback_url)
            .header("Content-Type", "application/json")
            .json(report);

        if let Some(key) = &self.config.api_key {
            request = request.header("x-api-key", key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DeliveryError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                DeliveryError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }

        debug!(
            session_id = %report.session_id,
            status = status.as_u16(),
            "collector accepted final report"
        );
        Ok(())
    }
}
