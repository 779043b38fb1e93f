//! The closed set of intelligence categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an extracted intelligence item.
///
/// This set is fixed and closed - the evaluator contract knows exactly these
/// five buckets and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntelligenceCategory {
    /// Bank account numbers (9-18 digits after separator stripping).
    BankAccount,
    /// UPI payment handles (`local@provider` with a known provider suffix).
    UpiId,
    /// Indian mobile numbers, with or without a +91 prefix.
    PhoneNumber,
    /// Links a victim would be told to click.
    PhishingLink,
    /// Pressure vocabulary from the fixed scam lexicon.
    SuspiciousKeyword,
}

impl IntelligenceCategory {
    /// All categories, in wire order.
    pub const ALL: [IntelligenceCategory; 5] = [
        IntelligenceCategory::BankAccount,
        IntelligenceCategory::UpiId,
        IntelligenceCategory::PhoneNumber,
        IntelligenceCategory::PhishingLink,
        IntelligenceCategory::SuspiciousKeyword,
    ];

    /// Stable wire name (matches the evaluator's JSON field names).
    pub fn as_str(&self) -> &'static str {
        match self {
            IntelligenceCategory::BankAccount => "bankAccounts",
            IntelligenceCategory::UpiId => "upiIds",
            IntelligenceCategory::PhoneNumber => "phoneNumbers",
            IntelligenceCategory::PhishingLink => "phishingLinks",
            IntelligenceCategory::SuspiciousKeyword => "suspiciousKeywords",
        }
    }
}

impl fmt::Display for IntelligenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_category_once() {
        assert_eq!(IntelligenceCategory::ALL.len(), 5);
        let mut names: Vec<_> = IntelligenceCategory::ALL.iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(IntelligenceCategory::BankAccount.to_string(), "bankAccounts");
        assert_eq!(IntelligenceCategory::UpiId.to_string(), "upiIds");
        assert_eq!(
            IntelligenceCategory::SuspiciousKeyword.to_string(),
            "suspiciousKeywords"
        );
    }
}
