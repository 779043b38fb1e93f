//! Session domain - per-conversation engagement state and termination rules.

mod aggregate;
mod persona;
mod policy;
mod status;

pub use aggregate::{Session, SessionSummary};
pub use persona::Persona;
pub use policy::{EndReason, TerminationPolicy};
pub use status::EngagementStatus;
