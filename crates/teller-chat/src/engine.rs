//! Assistant engine.
//!
//! Ties the classifier, response library, session manager, and optional
//! remote backend together behind one entry point. The core contract:
//! [`AssistantEngine::send_message`] always produces a reply. Backend
//! failures are logged and converted into locally classified responses,
//! never surfaced to the caller.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use teller_core::TellerConfig;

use crate::backend::{RemoteAssistant, RemoteOutcome};
use crate::classifier::MessageClassifier;
use crate::session::SessionManager;
use crate::templates::ResponseLibrary;
use crate::types::{
    ClassificationResult, HealthReport, HealthStatus, ResponseAnalytics, SessionAnalytics,
};

/// Simulated processing time bounds reported in per-response analytics,
/// in milliseconds.
const PROCESSING_TIME_MS: std::ops::Range<u64> = 200..700;

pub struct AssistantEngine {
    config: TellerConfig,
    classifier: MessageClassifier,
    library: ResponseLibrary,
    session: SessionManager,
    /// Shared so the health monitor can probe on a snapshot without
    /// holding the engine lock.
    backend: Option<Arc<RemoteAssistant>>,
    rng: StdRng,
}

impl AssistantEngine {
    /// Build an engine from configuration, seeding randomness from the OS.
    pub fn new(config: TellerConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Build an engine with a caller-supplied RNG. Tests seed this for
    /// deterministic template choice and analytics.
    pub fn with_rng(config: TellerConfig, rng: StdRng) -> Self {
        let backend = if config.backend.is_demo() {
            info!("Demo credentials configured, responses are simulated locally");
            None
        } else {
            match RemoteAssistant::new(&config.backend) {
                Ok(backend) => Some(Arc::new(backend)),
                Err(err) => {
                    warn!(error = %err, "Backend client unavailable, falling back to demo mode");
                    None
                }
            }
        };
        let session = SessionManager::new(&config.session);
        Self {
            classifier: MessageClassifier::new(),
            library: ResponseLibrary::new(),
            session,
            backend,
            rng,
            config,
        }
    }

    /// Process one user message and return the reply. Never fails: any
    /// backend problem degrades to the local classifier.
    pub async fn send_message(&mut self, text: &str) -> ClassificationResult {
        if !self.session.is_active() {
            self.initialize_session().await;
        }
        let interaction_count = self.session.record_interaction();
        self.simulate_latency().await;

        // The remote path is attempted on every message whenever a backend
        // is configured, even after session creation fell back to a local
        // id. A recovered backend picks the conversation back up without
        // waiting for re-initialization.
        let remote = match (&self.backend, self.session.session_id()) {
            (Some(backend), Some(session_id)) => Some(
                backend
                    .send_message(session_id, text, self.session.user_id(), interaction_count)
                    .await,
            ),
            _ => None,
        };

        match remote {
            Some(Ok(outcome)) => self.from_remote(outcome),
            Some(Err(err)) => {
                warn!(error = %err, "Backend message failed, classifying locally");
                self.classify_local(text, true)
            }
            None => self.classify_local(text, false),
        }
    }

    /// Run a message through the local classifier and template table.
    ///
    /// `recovered` prefixes the reply with the connection-recovery notice;
    /// it is set when a remote exchange just failed.
    pub fn classify_local(&mut self, text: &str, recovered: bool) -> ClassificationResult {
        let (intent, confidence) = self.classifier.classify_intent(text);
        let entities = self.classifier.extract_entities(text);
        let mut reply = self.library.pick(intent.category(), &mut self.rng);
        if recovered {
            reply = ResponseLibrary::recovered(&reply);
        }
        ClassificationResult {
            text: reply,
            intent,
            confidence,
            entities,
            session_id: self.session.session_id().map(String::from),
            analytics: self.synthesize_analytics(),
        }
    }

    fn from_remote(&mut self, outcome: RemoteOutcome) -> ClassificationResult {
        ClassificationResult {
            text: outcome.text,
            intent: outcome.intent,
            confidence: outcome.confidence,
            entities: outcome.entities,
            session_id: self.session.session_id().map(String::from),
            analytics: self.synthesize_analytics(),
        }
    }

    fn synthesize_analytics(&mut self) -> ResponseAnalytics {
        ResponseAnalytics {
            processing_time_ms: self.rng.random_range(PROCESSING_TIME_MS),
            model_version: self.config.chat.model_version.clone(),
            confidence_threshold: self.config.chat.confidence_threshold,
        }
    }

    /// Cosmetic response delay. Disabled when `max_ms` is 0.
    async fn simulate_latency(&mut self) {
        let delay = &self.config.chat.response_delay;
        if delay.max_ms == 0 {
            return;
        }
        let ms = if delay.min_ms >= delay.max_ms {
            delay.min_ms
        } else {
            self.rng.random_range(delay.min_ms..delay.max_ms)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Start a fresh session, remote when possible, and return its id.
    ///
    /// Any existing remote session is deleted first. If remote creation
    /// fails (or no backend is configured) a local session id is used, so
    /// this always leaves the engine with an active session.
    pub async fn initialize_session(&mut self) -> String {
        self.delete_remote_session().await;
        let session_id = match &self.backend {
            Some(backend) => match backend.create_session().await {
                Ok(id) => id,
                Err(err) => {
                    warn!(error = %err, "Remote session creation failed, using local session");
                    SessionManager::local_session_id()
                }
            },
            None => SessionManager::local_session_id(),
        };
        self.session.activate(session_id.clone());
        session_id
    }

    /// End the session: best-effort remote delete, then log and reset local
    /// state. Returns the final analytics snapshot.
    pub async fn teardown_session(&mut self) -> SessionAnalytics {
        self.delete_remote_session().await;
        self.session.teardown()
    }

    /// Delete the current remote session, if there is one. Local session
    /// ids never reach the backend.
    async fn delete_remote_session(&self) {
        if let (Some(backend), Some(session_id)) = (&self.backend, self.session.session_id()) {
            if !SessionManager::is_local_id(session_id) {
                if let Err(err) = backend.delete_session(session_id).await {
                    warn!(error = %err, "Remote session delete failed");
                }
            }
        }
    }

    /// Probe backend connectivity. Failures are reported in the result,
    /// never raised.
    pub async fn health_check(&self) -> HealthReport {
        probe_report(self.backend.as_deref()).await
    }

    /// Current session counters.
    pub fn session_analytics(&self) -> SessionAnalytics {
        self.session.analytics()
    }

    /// Run a predefined quick action through the normal message path.
    ///
    /// Unrecognized action names fall back to the help action.
    pub async fn quick_action(&mut self, action: &str) -> ClassificationResult {
        let prompt = match action {
            "check_balance" => "What's my account balance?",
            "view_transactions" => "Show me my recent transactions",
            "transfer_funds" => "I'd like to make a transfer",
            "credit_inquiry" => "Show me my credit card information",
            "investment_inquiry" => "Show me my investment portfolio",
            "report_issue" => "I'm having an issue",
            _ => "What can you help me with?",
        };
        self.send_message(prompt).await
    }
}

async fn probe_report(backend: Option<&RemoteAssistant>) -> HealthReport {
    match backend {
        None => HealthReport {
            status: HealthStatus::DemoMode,
            healthy: true,
            message: "Demo mode active. Responses are simulated locally.".to_string(),
        },
        Some(backend) => match backend.probe().await {
            Ok(()) => HealthReport {
                status: HealthStatus::Connected,
                healthy: true,
                message: "Assistant backend reachable.".to_string(),
            },
            Err(err) => HealthReport {
                status: HealthStatus::Error,
                healthy: false,
                message: err.to_string(),
            },
        },
    }
}

/// Background connectivity monitor. Probes on a fixed interval and logs the
/// result; runs until the task is dropped.
///
/// The engine lock is held only long enough to snapshot the probe handle,
/// so a slow probe never blocks in-flight messages.
pub async fn run_health_monitor(engine: Arc<Mutex<AssistantEngine>>, interval_secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        interval.tick().await;
        let backend = engine.lock().await.backend.clone();
        let report = probe_report(backend.as_deref()).await;
        if report.healthy {
            debug!(status = ?report.status, "Health check passed");
        } else {
            warn!(status = ?report.status, message = %report.message, "Health check failed");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
