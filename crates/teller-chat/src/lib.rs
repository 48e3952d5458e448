//! Conversational core for the Teller banking demo.
//!
//! Provides rule-based intent classification, entity extraction,
//! canned-response selection, in-memory session lifecycle tracking, and an
//! optional remote assistant backend that always degrades to the local
//! classifier on failure.

pub mod backend;
pub mod classifier;
pub mod data;
pub mod engine;
pub mod error;
pub mod session;
pub mod templates;
pub mod types;

pub use backend::RemoteAssistant;
pub use classifier::MessageClassifier;
pub use engine::{run_health_monitor, AssistantEngine};
pub use error::BackendError;
pub use session::SessionManager;
pub use templates::ResponseLibrary;
pub use types::{
    ClassificationResult, Entity, EntityKind, HealthReport, HealthStatus, Intent,
    ResponseAnalytics, ResponseCategory, SessionAnalytics,
};
