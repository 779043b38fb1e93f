//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Maximum accepted length for a caller-supplied session identifier.
pub const MAX_SESSION_ID_LENGTH: usize = 128;

/// Opaque identifier for one engagement with a single message sender.
///
/// Session identifiers are supplied by the caller (the inbound channel knows
/// the conversation), so unlike generated ids this one is a validated string:
/// non-empty after trimming and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId from a caller-supplied string.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the identifier is empty or whitespace only
    /// - `TooLong` if it exceeds [`MAX_SESSION_ID_LENGTH`]
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if trimmed.len() > MAX_SESSION_ID_LENGTH {
            return Err(ValidationError::too_long(
                "session_id",
                MAX_SESSION_ID_LENGTH,
                trimmed.len(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifier() {
        let id = SessionId::new("conv-2024-001").unwrap();
        assert_eq!(id.as_str(), "conv-2024-001");
        assert_eq!(id.to_string(), "conv-2024-001");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = SessionId::new("  abc-123  ").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn rejects_empty_identifier() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("   ").is_err());
    }

    #[test]
    fn rejects_overlong_identifier() {
        let long = "x".repeat(MAX_SESSION_ID_LENGTH + 1);
        assert!(SessionId::new(long).is_err());
    }

    #[test]
    fn parses_from_str() {
        let id: SessionId = "session-42".parse().unwrap();
        assert_eq!(id.as_str(), "session-42");
    }

    #[test]
    fn equal_strings_are_equal_ids() {
        let a = SessionId::new("same").unwrap();
        let b = SessionId::new("same").unwrap();
        assert_eq!(a, b);
    }
}
