//! Accumulated intelligence findings with set semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::IntelligenceCategory;

/// Categorized intelligence values.
///
/// Each category is a set: equality is value + category, insertion order is
/// irrelevant, duplicates collapse. `BTreeSet` keeps the flattened list form
/// deterministic without a separate sort.
///
/// Serializes to the evaluator's wire shape:
/// `{"bankAccounts": [...], "upiIds": [...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIntelligence {
    #[serde(default)]
    pub bank_accounts: BTreeSet<String>,
    #[serde(default)]
    pub upi_ids: BTreeSet<String>,
    #[serde(default)]
    pub phone_numbers: BTreeSet<String>,
    #[serde(default)]
    pub phishing_links: BTreeSet<String>,
    #[serde(default)]
    pub suspicious_keywords: BTreeSet<String>,
}

impl ExtractedIntelligence {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value set for a category.
    pub fn get(&self, category: IntelligenceCategory) -> &BTreeSet<String> {
        match category {
            IntelligenceCategory::BankAccount => &self.bank_accounts,
            IntelligenceCategory::UpiId => &self.upi_ids,
            IntelligenceCategory::PhoneNumber => &self.phone_numbers,
            IntelligenceCategory::PhishingLink => &self.phishing_links,
            IntelligenceCategory::SuspiciousKeyword => &self.suspicious_keywords,
        }
    }

    fn get_mut(&mut self, category: IntelligenceCategory) -> &mut BTreeSet<String> {
        match category {
            IntelligenceCategory::BankAccount => &mut self.bank_accounts,
            IntelligenceCategory::UpiId => &mut self.upi_ids,
            IntelligenceCategory::PhoneNumber => &mut self.phone_numbers,
            IntelligenceCategory::PhishingLink => &mut self.phishing_links,
            IntelligenceCategory::SuspiciousKeyword => &mut self.suspicious_keywords,
        }
    }

    /// Inserts one value into a category set. Returns true if it was new.
    pub fn insert(&mut self, category: IntelligenceCategory, value: impl Into<String>) -> bool {
        self.get_mut(category).insert(value.into())
    }

    /// Unions another container into this one.
    ///
    /// Returns true if and only if at least one category set strictly grew.
    /// Values are never removed, so repeated merges are monotonic.
    pub fn merge(&mut self, other: &ExtractedIntelligence) -> bool {
        let mut grew = false;
        for category in IntelligenceCategory::ALL {
            let target = self.get_mut(category);
            for value in other.get(category) {
                if target.insert(value.clone()) {
                    grew = true;
                }
            }
        }
        grew
    }

    /// Number of categories with at least one value.
    pub fn non_empty_categories(&self) -> usize {
        IntelligenceCategory::ALL
            .iter()
            .filter(|c| !self.get(**c).is_empty())
            .count()
    }

    /// Total distinct values across all categories.
    pub fn total_items(&self) -> usize {
        IntelligenceCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// True when every category set is empty.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Flattens a category set into an ordered list (for wire output).
    pub fn as_list(&self, category: IntelligenceCategory) -> Vec<String> {
        self.get(category).iter().cloned().collect()
    }
}
