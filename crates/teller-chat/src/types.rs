use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// The classified purpose of a user message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    CheckBalance,
    ViewTransactions,
    TransferFunds,
    CreditInquiry,
    InvestmentInquiry,
    HelpRequest,
    ReportIssue,
    /// Fallback when no pattern matches.
    GeneralInquiry,
}

impl Intent {
    /// The template category this intent draws responses from.
    ///
    /// Names line up one-to-one except the fallback, which uses `Default`.
    pub fn category(self) -> ResponseCategory {
        match self {
            Intent::Greeting => ResponseCategory::Greeting,
            Intent::CheckBalance => ResponseCategory::Balance,
            Intent::ViewTransactions => ResponseCategory::Transactions,
            Intent::TransferFunds => ResponseCategory::Transfer,
            Intent::CreditInquiry => ResponseCategory::Credit,
            Intent::InvestmentInquiry => ResponseCategory::Investment,
            Intent::HelpRequest => ResponseCategory::Help,
            Intent::ReportIssue => ResponseCategory::Issue,
            Intent::GeneralInquiry => ResponseCategory::Default,
        }
    }

    /// Snake-case wire label, as used by the remote assistant protocol.
    pub fn label(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::CheckBalance => "check_balance",
            Intent::ViewTransactions => "view_transactions",
            Intent::TransferFunds => "transfer_funds",
            Intent::CreditInquiry => "credit_inquiry",
            Intent::InvestmentInquiry => "investment_inquiry",
            Intent::HelpRequest => "help_request",
            Intent::ReportIssue => "report_issue",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }

    /// Parse a wire label; unknown labels map to the fallback intent.
    pub fn from_label(label: &str) -> Self {
        match label {
            "greeting" => Intent::Greeting,
            "check_balance" => Intent::CheckBalance,
            "view_transactions" => Intent::ViewTransactions,
            "transfer_funds" => Intent::TransferFunds,
            "credit_inquiry" => Intent::CreditInquiry,
            "investment_inquiry" => Intent::InvestmentInquiry,
            "help_request" => Intent::HelpRequest,
            "report_issue" => Intent::ReportIssue,
            _ => Intent::GeneralInquiry,
        }
    }
}

/// Response template category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Greeting,
    Balance,
    Transactions,
    Transfer,
    Help,
    Credit,
    Investment,
    Issue,
    Default,
}

/// Kind of a value extracted from free text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A currency amount, e.g. "1,234.56".
    Amount,
    /// An account-type keyword: checking, savings, credit, or investment.
    AccountType,
}

// =============================================================================
// Per-message results
// =============================================================================

/// A structured value extracted from the message text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
    /// Static plausibility score for this entity kind, not a learned
    /// probability.
    pub confidence: f64,
}

/// Cosmetic telemetry reported alongside every classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseAnalytics {
    /// Simulated processing time in milliseconds; not derived from real
    /// timing.
    pub processing_time_ms: u64,
    pub model_version: String,
    pub confidence_threshold: f64,
}

/// The full result of classifying one inbound message.
///
/// Ephemeral: produced per message and handed to the presentational layer,
/// never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Response text chosen from the template table.
    pub text: String,
    pub intent: Intent,
    /// Pattern-keyed confidence in [0, 1].
    pub confidence: f64,
    pub entities: Vec<Entity>,
    pub session_id: Option<String>,
    pub analytics: ResponseAnalytics,
}

// =============================================================================
// Session analytics and health
// =============================================================================

/// Point-in-time snapshot of the session counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionAnalytics {
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub interaction_count: u64,
    pub is_active: bool,
    /// Milliseconds since session start; 0 when inactive.
    pub uptime_ms: u64,
}

/// Connectivity state reported by a health probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No real backend configured; responses are simulated locally.
    DemoMode,
    /// The remote assistant answered the probe.
    Connected,
    /// The probe failed.
    Error,
}

/// Structured health-check result. Probe failures are reported here, never
/// raised.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub healthy: bool,
    pub message: String,
}

// =============================================================================
// Tests
// =============================================================================
