//! Final-report delivery adapters.

mod http_endpoint;
mod mock_endpoint;
mod report_delivery;

pub use http_endpoint::{HttpEndpointConfig, HttpReportEndpoint};
pub use mock_endpoint::MockReportEndpoint;
pub use report_delivery::{ReportDelivery, RetrySchedule};
