//! Adapters - infrastructure implementations of the ports.

pub mod agents;
pub mod delivery;
pub mod http;
pub mod store;

pub use agents::{KeywordClassifier, ScriptedClassifier, ScriptedResponder, TemplateResponder};
pub use delivery::{HttpEndpointConfig, HttpReportEndpoint, MockReportEndpoint, ReportDelivery, RetrySchedule};
pub use store::InMemorySessionStore;
