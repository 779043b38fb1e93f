//! The extraction engine: raw message text in, validated findings out.
//!
//! Pure and total - malformed or empty input yields empty sets, never an
//! error. All five passes run independently over the same text and results
//! are never cross-deduplicated between categories.
//!
//! Patterns and the keyword lexicon are fixed at compile time; validation
//! prunes the candidates the patterns over-match (implausible account
//! numbers, unknown UPI providers).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExtractedIntelligence, IntelligenceCategory};

/// Digit groups of 4+4+4..10, optionally split by spaces or hyphens.
/// Matches 12-18 digit account candidates; shorter forms are phone territory.
static BANK_ACCOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4,10}\b").expect("bank account pattern"));

/// `local@provider` handles restricted to known payment-provider suffixes.
/// Unknown suffixes are rejected even when syntactically well-formed, which
/// keeps ordinary e-mail addresses out of the haul.
static UPI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b[\w.\-]+@(?:paytm|ybl|axisbank|oksbi|icici|sbi|hdfc|airtel|freecharge|jiomoney|mobikwik|apl|okicici|okaxis)\b",
    )
    .expect("upi pattern")
});

/// Indian mobile numbers: optional +91 prefix, first digit 6-9, 10 digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\s-]?)?[6-9]\d{9}\b").expect("phone pattern"));

/// Anything that looks like a clickable link.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("url pattern"));

/// Shortened bit.ly links, which the URL pattern alone would miss.
static BITLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)bit\.ly/\S+").expect("bitly pattern"));

/// The closed scam vocabulary, all lowercase. Matching is case-insensitive
/// containment; each term present in the text is reported once, in this
/// canonical form.
pub const SCAM_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "blocked",
    "suspended",
    "verify",
    "otp",
    "password",
    "cvv",
    "expire",
    "limited time",
    "act now",
    "account closed",
    "confirm identity",
    "click here",
    "debit",
    "credit",
    "transaction",
    "kyc",
    "bank",
    "financial",
    "loan",
    "lucky draw",
    "prize",
    "winning",
    "redeem",
    "cashback",
    "reward",
    "congratulations",
    "fund",
    "transfer",
    "link",
    "application",
    "form",
    "secret",
    "code",
    "security",
    "fraud",
    "alert",
    "problem",
    "issue",
    "restore",
    "validate",
    "investment",
    "opportunity",
    "profit",
    "money",
    "fee",
    "tax",
    "customs",
    "delivery",
    "package",
    "shipment",
    "update",
    "attention",
    "warning",
    "confirm",
    "personal",
    "information",
    "details",
    "contact",
    "official",
    "government",
    "police",
    "court",
    "arrest",
    "warrant",
    "fine",
    "penalty",
];

/// Digit strings nobody uses as a real account number.
const TRIVIAL_SEQUENCES: &[&str] = &["123456789", "987654321", "1234567890"];

/// Punctuation a link drags along from the surrounding sentence.
const TRAILING_LINK_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?', '"', '\''];

/// Runs all five extraction passes over the text.
///
/// Deterministic: the same input always yields the same mapping. Empty or
/// whitespace-only text yields an all-empty result.
pub fn extract_all(text: &str) -> ExtractedIntelligence {
    let mut intel = ExtractedIntelligence::new();
    if text.trim().is_empty() {
        return intel;
    }

    for account in extract_bank_accounts(text) {
        intel.insert(IntelligenceCategory::BankAccount, account);
    }
    for upi in extract_upi_ids(text) {
        intel.insert(IntelligenceCategory::UpiId, upi);
    }
    for phone in extract_phone_numbers(text) {
        intel.insert(IntelligenceCategory::PhoneNumber, phone);
    }
    for link in extract_phishing_links(text) {
        intel.insert(IntelligenceCategory::PhishingLink, link);
    }
    for keyword in extract_keywords(text) {
        intel.insert(IntelligenceCategory::SuspiciousKeyword, keyword);
    }
    intel
}

/// Candidate account numbers, separator-stripped and plausibility-checked.
pub fn extract_bank_accounts(text: &str) -> Vec<String> {
    BANK_ACCOUNT_RE
        .find_iter(text)
        .map(|m| strip_separators(m.as_str()))
        .filter(|digits| is_plausible_account(digits))
        .collect()
}

/// UPI handles with a whitelisted provider suffix, stored lowercase.
pub fn extract_upi_ids(text: &str) -> Vec<String> {
    UPI_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Mobile numbers, separator-stripped, +91 prefix retained when present.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| strip_separators(m.as_str()))
        .filter(|number| is_plausible_phone(number))
        .collect()
}

/// Link candidates up to the next whitespace, trailing punctuation trimmed.
/// No reachability check - a syntactic match is enough.
pub fn extract_phishing_links(text: &str) -> Vec<String> {
    // "https://bit.ly/x" and "www.bit.ly/x" already match the full URL
    // pattern; only bare shortener links go through the second pass.
    let bare_shorteners = BITLY_RE.find_iter(text).filter(|m| {
        let before = &text[..m.start()];
        !before.ends_with("://") && !before.ends_with('.')
    });
    URL_RE
        .find_iter(text)
        .chain(bare_shorteners)
        .filter_map(|m| {
            let cleaned = m.as_str().trim_end_matches(TRAILING_LINK_PUNCTUATION);
            // A bare scheme or "www." with nothing behind it is noise.
            let remainder_ok = ["http://", "https://", "www.", "bit.ly/"]
                .iter()
                .all(|prefix| !cleaned.eq_ignore_ascii_case(prefix));
            (remainder_ok && !cleaned.is_empty()).then(|| cleaned.to_string())
        })
        .collect()
}

/// Vocabulary terms present in the text (case-insensitive containment).
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SCAM_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

fn strip_separators(candidate: &str) -> String {
    candidate.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Plausibility rules for a separator-stripped account candidate:
/// 9-18 digits, at least 3 distinct digits, not a trivial sequence, not a
/// single ascending or descending digit run.
fn is_plausible_account(digits: &str) -> bool {
    let len = digits.len();
    if !(9..=18).contains(&len) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut seen = [false; 10];
    for b in digits.bytes() {
        seen[(b - b'0') as usize] = true;
    }
    if seen.iter().filter(|s| **s).count() < 3 {
        return false;
    }
    if TRIVIAL_SEQUENCES.contains(&digits) {
        return false;
    }
    !is_sequential_run(digits)
}

/// True when every adjacent digit pair steps by exactly +1 (ascending) or
/// exactly -1 (descending) over the whole string, e.g. "012345678".
/// Longer strings that merely contain a run ("400123456789") are fine.
fn is_sequential_run(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    let ascending = bytes.windows(2).all(|w| w[1] as i16 - w[0] as i16 == 1);
    let descending = bytes.windows(2).all(|w| w[0] as i16 - w[1] as i16 == 1);
    ascending || descending
}

/// A separator-stripped phone candidate is either 10 bare digits starting
/// 6-9 or the same with a +91 prefix.
fn is_plausible_phone(number: &str) -> bool {
    if let Some(rest) = number.strip_prefix("+91") {
        rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit())
    } else {
        number.len() == 10 && number.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Bank account validation

    #[test]
    fn account_accepts_ordinary_numbers() {
        assert!(is_plausible_account("400123456789"));
        assert!(is_plausible_account("1234567890123456"));
        assert!(is_plausible_account("9876543210987"));
        assert!(is_plausible_account("55554444333322221"));
    }

    #[test]
    fn account_rejects_bad_lengths() {
        assert!(!is_plausible_account("12345678")); // 8 digits
        assert!(!is_plausible_account("1234567890123456789")); // 19 digits
        assert!(!is_plausible_account(""));
    }

    #[test]
    fn account_rejects_low_digit_diversity() {
        assert!(!is_plausible_account("111111111")); // 1 distinct
        assert!(!is_plausible_account("121212121212")); // 2 distinct
        assert!(!is_plausible_account("0000000000000000"));
    }

    #[test]
    fn account_rejects_trivial_sequences() {
        assert!(!is_plausible_account("123456789"));
        assert!(!is_plausible_account("987654321"));
        assert!(!is_plausible_account("1234567890"));
        assert!(!is_plausible_account("012345678")); // pure ascending run
    }

    #[test]
    fn account_accepts_sequence_embedded_in_longer_number() {
        // Contains "123456789" as a substring but is not itself a run.
        assert!(is_plausible_account("400123456789"));
    }

    #[test]
    fn extracts_separated_account_groups() {
        let text = "Send to 1234-5678-90123456 or 9876 5432 1098 today";
        let accounts = extract_bank_accounts(text);
        assert!(accounts.contains(&"1234567890123456".to_string()));
        assert!(accounts.contains(&"987654321098".to_string()));
    }

    #[test]
    fn low_diversity_groups_rejected() {
        assert!(extract_bank_accounts("pay 5555 5555 5555").is_empty());
        assert!(extract_bank_accounts("pay 1212 1212 1212").is_empty());
    }

    // UPI

    #[test]
    fn upi_accepts_known_providers_only() {
        let text = "Pay user@paytm or john.doe@ybl but not email@example.com";
        let upis = extract_upi_ids(text);
        assert_eq!(upis.len(), 2);
        assert!(upis.contains(&"user@paytm".to_string()));
        assert!(upis.contains(&"john.doe@ybl".to_string()));
    }

    #[test]
    fn upi_is_lowercased() {
        let upis = extract_upi_ids("Send to SCAMMER@PayTM now");
        assert_eq!(upis, vec!["scammer@paytm"]);
    }

    // Phones

    #[test]
    fn phone_accepts_bare_and_prefixed() {
        let numbers = extract_phone_numbers("Call +919876543210 or 8765432109 today");
        assert!(numbers.contains(&"+919876543210".to_string()));
        assert!(numbers.contains(&"8765432109".to_string()));
    }

    #[test]
    fn phone_rejects_bad_leading_digit() {
        // 10 digits starting with 1 never match the pattern.
        assert!(extract_phone_numbers("call 1234567890").is_empty());
    }

    #[test]
    fn phone_strips_prefix_separator() {
        let numbers = extract_phone_numbers("reach me at +91 9876543210");
        assert_eq!(numbers, vec!["+919876543210"]);
    }

    // Links

    #[test]
    fn links_match_all_prefixes() {
        let text = "go to http://phishing.com/scam then bit.ly/malicious and www.fake.org";
        let links = extract_phishing_links(text);
        assert!(links.contains(&"http://phishing.com/scam".to_string()));
        assert!(links.contains(&"bit.ly/malicious".to_string()));
        assert!(links.contains(&"www.fake.org".to_string()));
    }

    #[test]
    fn links_trim_sentence_punctuation() {
        let links = extract_phishing_links("Click https://fake-bank.com/verify!");
        assert_eq!(links, vec!["https://fake-bank.com/verify"]);
    }

    #[test]
    fn scheme_prefixed_shortener_counts_once() {
        let links = extract_phishing_links("grab it at https://bit.ly/free-cash now");
        assert_eq!(links, vec!["https://bit.ly/free-cash"]);

        let links = extract_phishing_links("or www.bit.ly/free-cash today");
        assert_eq!(links, vec!["www.bit.ly/free-cash"]);
    }

    #[test]
    fn bare_domain_is_not_a_link() {
        assert!(extract_phishing_links("visit example.com for info").is_empty());
    }

    // Keywords

    #[test]
    fn keywords_match_case_insensitively() {
        let keywords = extract_keywords("URGENT: send your OTP to Verify");
        assert!(keywords.contains(&"urgent".to_string()));
        assert!(keywords.contains(&"otp".to_string()));
        assert!(keywords.contains(&"verify".to_string()));
    }

    #[test]
    fn multiword_keywords_match() {
        let keywords = extract_keywords("act now, this is a limited time offer - click here");
        assert!(keywords.contains(&"act now".to_string()));
        assert!(keywords.contains(&"limited time".to_string()));
        assert!(keywords.contains(&"click here".to_string()));
    }

    #[test]
    fn benign_text_yields_no_keywords() {
        assert!(extract_keywords("see you at lunch tomorrow").is_empty());
    }

    // extract_all

    #[test]
    fn empty_input_yields_empty_result() {
        assert!(extract_all("").is_empty());
        assert!(extract_all("   \n\t ").is_empty());
    }

    #[test]
    fn classic_scam_message_scenario() {
        let text = "URGENT: verify your account, send OTP or account is BLOCKED. \
                    Pay to scammer@paytm or call 9876543210. Click http://fake-bank.com now";
        let intel = extract_all(text);

        assert_eq!(intel.as_list(IntelligenceCategory::UpiId), vec!["scammer@paytm"]);
        assert_eq!(
            intel.as_list(IntelligenceCategory::PhoneNumber),
            vec!["9876543210"]
        );
        assert_eq!(
            intel.as_list(IntelligenceCategory::PhishingLink),
            vec!["http://fake-bank.com"]
        );
        assert!(intel.get(IntelligenceCategory::BankAccount).is_empty());

        let keywords = intel.get(IntelligenceCategory::SuspiciousKeyword);
        for expected in ["urgent", "verify", "blocked", "otp"] {
            assert!(keywords.contains(expected), "missing keyword {expected}");
        }
    }

    #[test]
    fn passes_are_independent() {
        // The same digit string can be both a phone number and part of a
        // longer account candidate; categories never steal from each other.
        let text = "account 9876 5432 1098 7654, call 9876543210";
        let intel = extract_all(text);
        assert!(!intel.get(IntelligenceCategory::BankAccount).is_empty());
        assert!(!intel.get(IntelligenceCategory::PhoneNumber).is_empty());
    }

    proptest! {
        #[test]
        fn extraction_is_deterministic(text in ".{0,300}") {
            prop_assert_eq!(extract_all(&text), extract_all(&text));
        }

        #[test]
        fn extraction_never_panics_on_arbitrary_input(text in "\\PC{0,400}") {
            let _ = extract_all(&text);
        }

        #[test]
        fn merging_own_extraction_twice_never_grows(text in ".{0,300}") {
            let mut base = extract_all(&text);
            let again = extract_all(&text);
            prop_assert!(!base.merge(&again));
        }
    }
}
