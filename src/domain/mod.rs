//! Domain layer - core business logic with no infrastructure dependencies.

pub mod foundation;
pub mod intelligence;
pub mod session;
