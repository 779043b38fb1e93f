//! Keyword Classifier - offline heuristic implementation of [`ScamClassifier`].
//!
//! Scores the message on lexical scam markers and on concrete artifacts
//! (payment handles, account numbers, links) found in the text. No network
//! calls, so it doubles as the fallback when no upstream model is configured.

use async_trait::async_trait;

use crate::domain::intelligence::{extract_all, IntelligenceCategory};
use crate::ports::{ClassifierError, ScamClassifier, ScamVerdict, TranscriptMessage};

/// Score contributed by each matched scam keyword.
const KEYWORD_WEIGHT: f32 = 0.15;
/// Score contributed by each non-keyword artifact category present.
const ARTIFACT_WEIGHT: f32 = 0.35;
/// Minimum score before the message is flagged as a scam.
const SCAM_THRESHOLD: f32 = 0.3;

/// Heuristic scam classifier with no external dependencies.
#[derive(Debug, Default, Clone)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScamClassifier for KeywordClassifier {
    async fn classify(
        &self,
        text: &str,
        _history: &[TranscriptMessage],
    ) -> Result<ScamVerdict, ClassifierError> {
        let intel = extract_all(text);

        let mut indicators: Vec<String> = intel
            .get(IntelligenceCategory::SuspiciousKeyword)
            .iter()
            .cloned()
            .collect();
        let keyword_count = indicators.len();

        let mut score = keyword_count as f32 * KEYWORD_WEIGHT;
        for category in IntelligenceCategory::ALL {
            if category == IntelligenceCategory::SuspiciousKeyword {
                continue;
            }
            let items = intel.get(category);
            if !items.is_empty() {
                score += ARTIFACT_WEIGHT;
                indicators.extend(items.iter().cloned());
            }
        }

        let is_scam = score >= SCAM_THRESHOLD;
        let confidence = if is_scam {
            score.min(1.0)
        } else {
            // Low-signal messages get a weak "probably benign" verdict.
            0.5 - score
        };

        let reason = if is_scam {
            format!(
                "matched {} scam markers across {} categories",
                indicators.len(),
                intel.non_empty_categories()
            )
        } else {
            "no significant scam markers".to_string()
        };

        Ok(ScamVerdict::new(is_scam, confidence, reason).with_indicators(indicators))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn classic_scam_message_is_flagged_with_high_confidence() {
        let classifier = KeywordClassifier::new();
        let verdict = classifier
            .classify(
                "URGENT: verify your account! Send OTP to scammer@paytm or call 9876543210",
                &[],
            )
            .await
            .unwrap();

        assert!(verdict.is_scam);
        assert!(verdict.confidence > 0.7);
        assert!(!verdict.indicators.is_empty());
    }

    #[tokio::test]
    async fn benign_message_is_not_flagged() {
        let classifier = KeywordClassifier::new();
        let verdict = classifier
            .classify("Hey, are we still on for lunch tomorrow?", &[])
            .await
            .unwrap();

        assert!(!verdict.is_scam);
        assert!(verdict.confidence <= 0.5);
        assert!(verdict.indicators.is_empty());
    }

    #[tokio::test]
    async fn single_keyword_alone_stays_below_threshold() {
        let classifier = KeywordClassifier::new();
        let verdict = classifier
            .classify("Can you verify the meeting time for tomorrow?", &[])
            .await
            .unwrap();

        assert!(!verdict.is_scam);
        assert_eq!(verdict.indicators, vec!["verify".to_string()]);
    }
}
