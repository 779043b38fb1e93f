//! The decoy persona presented to a scammer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Persona the responder speaks as for one session.
///
/// Once a session has a persona it never changes - a scammer who was talking
/// to a confused retiree must keep talking to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Trusting, slow with technology, asks for things to be repeated.
    Elderly,
    /// Busy and curt, wants details in writing.
    Professional,
    /// Eager but clueless, follows instructions badly.
    Novice,
}

impl Persona {
    /// Stable lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Elderly => "elderly",
            Persona::Professional => "professional",
            Persona::Novice => "novice",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Persona {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elderly" => Ok(Persona::Elderly),
            "professional" => Ok(Persona::Professional),
            "novice" => Ok(Persona::Novice),
            other => Err(ValidationError::invalid_format(
                "persona",
                format!("unknown persona '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for persona in [Persona::Elderly, Persona::Professional, Persona::Novice] {
            assert_eq!(persona.as_str().parse::<Persona>().unwrap(), persona);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Elderly".parse::<Persona>().unwrap(), Persona::Elderly);
    }

    #[test]
    fn unknown_persona_is_rejected() {
        assert!("wizard".parse::<Persona>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Persona::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}
