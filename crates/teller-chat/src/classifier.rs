//! Message classification for the banking assistant.
//!
//! Maps raw user text to an intent with a pattern-keyed confidence score,
//! and extracts currency-amount and account-type entities.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Entity, EntityKind, Intent};

// =============================================================================
// Compiled rule set (compiled once, reused across calls)
// =============================================================================

/// One classification rule: pattern, intent, and its static confidence.
struct IntentRule {
    regex: Regex,
    intent: Intent,
    confidence: f64,
}

/// Ordered intent rules. Evaluation is first-match-wins, so this order IS
/// the tie-break precedence: "I need help with a transfer problem" matches
/// both the transfer and help groups, and transfer wins because it is
/// listed first. Reordering this table changes observable behavior.
static INTENT_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    let mk = |pat: &str, intent: Intent, confidence: f64| IntentRule {
        regex: Regex::new(pat).expect("Invalid intent regex"),
        intent,
        confidence,
    };

    vec![
        mk(
            r"(?i)\b(hello|hi|hey|good\s+(morning|afternoon|evening)|greetings)\b",
            Intent::Greeting,
            0.95,
        ),
        mk(
            r"(?i)\b(balance|account|money|funds|how\s+much)\b",
            Intent::CheckBalance,
            0.90,
        ),
        mk(
            r"(?i)\b(transaction|history|recent|statement|spending|purchases)\b",
            Intent::ViewTransactions,
            0.88,
        ),
        mk(
            r"(?i)\b(transfer|send|move|wire|pay|payment)\b",
            Intent::TransferFunds,
            0.92,
        ),
        // "payment" also appears here; the transfer group above always
        // claims it first.
        mk(
            r"(?i)\b(credit|card|limit|available|payment|pay\s+off)\b",
            Intent::CreditInquiry,
            0.85,
        ),
        mk(
            r"(?i)\b(investment|portfolio|stocks|mutual\s+funds|performance|market)\b",
            Intent::InvestmentInquiry,
            0.83,
        ),
        mk(
            r"(?i)\b(help|assist|support|what\s+can|services|options)\b",
            Intent::HelpRequest,
            0.90,
        ),
        mk(
            r"(?i)\b(issue|problem|error|trouble|broken|not\s+working|help|stuck)\b",
            Intent::ReportIssue,
            0.87,
        ),
    ]
});

/// Currency amount: optional `$`, digits with optional thousands separators
/// and optional two-decimal fraction. The captured group excludes the `$`.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)").unwrap());

/// Account-type keywords in their fixed scan order. Matches are emitted in
/// this order regardless of where they appear in the input, and no
/// deduplication is performed beyond one entity per keyword.
const ACCOUNT_TYPES: [&str; 4] = ["checking", "savings", "credit", "investment"];

const FALLBACK_CONFIDENCE: f64 = 0.80;
const AMOUNT_CONFIDENCE: f64 = 0.95;
const ACCOUNT_TYPE_CONFIDENCE: f64 = 0.90;

// =============================================================================
// MessageClassifier
// =============================================================================

/// Rule-based message classifier.
#[derive(Debug, Default)]
pub struct MessageClassifier;

impl MessageClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the intent of a raw message.
    ///
    /// Checks the ordered rule list; the first matching group wins. Falls
    /// back to [`Intent::GeneralInquiry`] at confidence 0.80 when nothing
    /// matches.
    pub fn classify_intent(&self, text: &str) -> (Intent, f64) {
        for rule in INTENT_RULES.iter() {
            if rule.regex.is_match(text) {
                return (rule.intent, rule.confidence);
            }
        }
        (Intent::GeneralInquiry, FALLBACK_CONFIDENCE)
    }

    /// Extract amount and account-type entities from the raw message.
    ///
    /// Independent of intent. At most one amount (the first match), then
    /// one account-type entity per keyword found, in the fixed scan order
    /// checking, savings, credit, investment.
    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        if let Some(caps) = AMOUNT_RE.captures(text) {
            if let Some(m) = caps.get(1) {
                entities.push(Entity {
                    kind: EntityKind::Amount,
                    value: m.as_str().to_string(),
                    confidence: AMOUNT_CONFIDENCE,
                });
            }
        }

        let lower = text.to_lowercase();
        for keyword in ACCOUNT_TYPES {
            if lower.contains(keyword) {
                entities.push(Entity {
                    kind: EntityKind::AccountType,
                    value: keyword.to_string(),
                    confidence: ACCOUNT_TYPE_CONFIDENCE,
                });
            }
        }

        entities
    }
}

// =============================================================================
// Tests
// =============================================================================
