//! Ports - interfaces between the engagement core and the outside world.
//!
//! The classifier and responder are opaque capabilities (their model
//! behavior is out of scope); the store and report endpoint are seams for
//! swapping infrastructure.

mod persona_responder;
mod report_endpoint;
mod scam_classifier;
mod session_store;
mod transcript;

pub use persona_responder::{PersonaResponder, ResponderError};
pub use report_endpoint::{DeliveryError, FinalReport, ReportEndpoint};
pub use scam_classifier::{ClassifierError, ScamClassifier, ScamVerdict};
pub use session_store::SessionStore;
pub use transcript::TranscriptMessage;
