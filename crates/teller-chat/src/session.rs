//! In-memory session lifecycle tracking.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use teller_core::config::SessionConfig;

use crate::types::SessionAnalytics;

/// Prefix marking locally generated session ids. Ids with this prefix never
/// correspond to a remote session, so teardown skips the remote delete for
/// them.
pub const LOCAL_SESSION_PREFIX: &str = "demo-session-";

/// Mutable per-session state. A session is active iff `session_id` is set.
#[derive(Debug, Clone, Default)]
struct Session {
    session_id: Option<String>,
    started_at: Option<DateTime<Utc>>,
    interaction_count: u64,
}

/// Tracks the single active conversation session.
///
/// Pure local state machine: Uninitialized, Active, back to Uninitialized on
/// teardown. Remote session creation and deletion live with the engine; this
/// type only records whatever id it is handed.
#[derive(Debug)]
pub struct SessionManager {
    session: Session,
    user_id: String,
    locale: String,
    security_level: String,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            session: Session::default(),
            user_id: config.user_id.clone(),
            locale: config.locale.clone(),
            security_level: config.security_level.clone(),
        }
    }

    /// Generate a fresh local session id. No I/O; always succeeds.
    pub fn local_session_id() -> String {
        format!("{LOCAL_SESSION_PREFIX}{}", Uuid::new_v4().simple())
    }

    /// Whether an id was generated locally rather than by the backend.
    pub fn is_local_id(id: &str) -> bool {
        id.starts_with(LOCAL_SESSION_PREFIX)
    }

    /// Start a session under the given id.
    ///
    /// Safe to call while a session is already active: the old session is
    /// replaced wholesale and the interaction counter starts over.
    pub fn activate(&mut self, session_id: String) {
        info!(session_id = %session_id, "Session started");
        self.session = Session {
            session_id: Some(session_id),
            started_at: Some(Utc::now()),
            interaction_count: 0,
        };
    }

    /// Count one inbound message. Returns the updated total.
    pub fn record_interaction(&mut self) -> u64 {
        self.session.interaction_count += 1;
        self.session.interaction_count
    }

    pub fn is_active(&self) -> bool {
        self.session.session_id.is_some()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id.as_deref()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn security_level(&self) -> &str {
        &self.security_level
    }

    pub fn interaction_count(&self) -> u64 {
        self.session.interaction_count
    }

    /// Point-in-time session counters. Uptime is 0 when no session is
    /// active.
    pub fn analytics(&self) -> SessionAnalytics {
        let uptime_ms = self
            .session
            .started_at
            .map(|started| {
                let elapsed = Utc::now().signed_duration_since(started);
                elapsed.num_milliseconds().max(0) as u64
            })
            .unwrap_or(0);
        SessionAnalytics {
            session_id: self.session.session_id.clone(),
            started_at: self.session.started_at,
            interaction_count: self.session.interaction_count,
            is_active: self.is_active(),
            uptime_ms,
        }
    }

    /// End the session: log a final analytics snapshot, return it, and
    /// reset all per-session state. A no-op snapshot is returned when no
    /// session is active.
    pub fn teardown(&mut self) -> SessionAnalytics {
        let snapshot = self.analytics();
        if let Some(id) = &snapshot.session_id {
            info!(
                session_id = %id,
                interactions = snapshot.interaction_count,
                uptime_ms = snapshot.uptime_ms,
                "Session ended"
            );
        }
        self.session = Session::default();
        snapshot
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(&SessionConfig::default())
    }

    #[test]
    fn test_starts_inactive() {
        let mgr = manager();
        assert!(!mgr.is_active());
        assert_eq!(mgr.session_id(), None);
        assert_eq!(mgr.interaction_count(), 0);
    }

    #[test]
    fn test_activate() {
        let mut mgr = manager();
        mgr.activate("remote-abc".to_string());
        assert!(mgr.is_active());
        assert_eq!(mgr.session_id(), Some("remote-abc"));
        assert_eq!(mgr.interaction_count(), 0);
    }

    #[test]
    fn test_record_interaction_increments() {
        let mut mgr = manager();
        mgr.activate(SessionManager::local_session_id());
        assert_eq!(mgr.record_interaction(), 1);
        assert_eq!(mgr.record_interaction(), 2);
        assert_eq!(mgr.interaction_count(), 2);
    }

    #[test]
    fn test_reactivate_resets_counter() {
        let mut mgr = manager();
        mgr.activate("first".to_string());
        mgr.record_interaction();
        mgr.record_interaction();

        mgr.activate("second".to_string());
        assert_eq!(mgr.session_id(), Some("second"));
        assert_eq!(mgr.interaction_count(), 0);
    }

    #[test]
    fn test_analytics_active() {
        let mut mgr = manager();
        mgr.activate("abc".to_string());
        mgr.record_interaction();

        let analytics = mgr.analytics();
        assert!(analytics.is_active);
        assert_eq!(analytics.session_id.as_deref(), Some("abc"));
        assert_eq!(analytics.interaction_count, 1);
        assert!(analytics.started_at.is_some());
    }

    #[test]
    fn test_analytics_inactive_uptime_zero() {
        let analytics = manager().analytics();
        assert!(!analytics.is_active);
        assert_eq!(analytics.uptime_ms, 0);
        assert!(analytics.started_at.is_none());
    }

    #[test]
    fn test_teardown_returns_snapshot_and_resets() {
        let mut mgr = manager();
        mgr.activate("abc".to_string());
        mgr.record_interaction();

        let snapshot = mgr.teardown();
        assert_eq!(snapshot.session_id.as_deref(), Some("abc"));
        assert_eq!(snapshot.interaction_count, 1);
        assert!(snapshot.is_active);

        assert!(!mgr.is_active());
        assert_eq!(mgr.interaction_count(), 0);
        assert_eq!(mgr.session_id(), None);
    }

    #[test]
    fn test_teardown_without_session_is_noop() {
        let mut mgr = manager();
        let snapshot = mgr.teardown();
        assert!(!snapshot.is_active);
        assert_eq!(snapshot.session_id, None);
    }

    #[test]
    fn test_local_session_ids_unique_and_prefixed() {
        let a = SessionManager::local_session_id();
        let b = SessionManager::local_session_id();
        assert_ne!(a, b);
        assert!(SessionManager::is_local_id(&a));
        assert!(!SessionManager::is_local_id("srv-session-1"));
    }

    #[test]
    fn test_user_metadata_from_config() {
        let mgr = manager();
        assert_eq!(mgr.user_id(), "sarah_johnson_789123");
        assert_eq!(mgr.locale(), "en-US");
        assert_eq!(mgr.security_level(), "enhanced");
    }
}
