//! Remote assistant client.
//!
//! Thin reqwest wrapper over the assistant platform's session API. Every
//! method returns `Result`; deciding what a failure means (always: fall back
//! to the local classifier) is the engine's job, not this module's.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use teller_core::config::BackendConfig;

use crate::error::BackendError;
use crate::types::{Entity, EntityKind, Intent};

/// Reply text used when the backend answered but sent no generic output.
const EMPTY_REPLY_TEXT: &str =
    "I apologize, but I couldn't process your request at the moment.";

/// Confidence assigned when the backend reply carries no intent.
const UNSCORED_CONFIDENCE: f64 = 0.5;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SessionReply {
    session_id: String,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    input: MessageInput<'a>,
    context: MessageContext<'a>,
}

#[derive(Debug, Serialize)]
struct MessageInput<'a> {
    message_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct MessageContext<'a> {
    global: GlobalContext<'a>,
}

#[derive(Debug, Serialize)]
struct GlobalContext<'a> {
    session_id: &'a str,
    user_id: &'a str,
    interaction_count: u64,
}

#[derive(Debug, Deserialize)]
struct MessageReply {
    #[serde(default)]
    output: ReplyOutput,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyOutput {
    #[serde(default)]
    generic: Vec<GenericReply>,
    #[serde(default)]
    intents: Vec<WireIntent>,
    #[serde(default)]
    entities: Vec<WireEntity>,
}

#[derive(Debug, Deserialize)]
struct GenericReply {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireIntent {
    intent: String,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    entity: String,
    value: String,
    #[serde(default)]
    confidence: f64,
}

/// What the engine needs from a successful backend exchange.
#[derive(Debug, Clone)]
pub struct RemoteOutcome {
    pub text: String,
    pub intent: Intent,
    pub confidence: f64,
    pub entities: Vec<Entity>,
}

impl From<MessageReply> for RemoteOutcome {
    fn from(reply: MessageReply) -> Self {
        let text = reply
            .output
            .generic
            .into_iter()
            .find_map(|g| g.text)
            .unwrap_or_else(|| EMPTY_REPLY_TEXT.to_string());

        let (intent, confidence) = match reply.output.intents.first() {
            Some(top) => (Intent::from_label(&top.intent), top.confidence),
            None => (Intent::GeneralInquiry, UNSCORED_CONFIDENCE),
        };

        let entities = reply
            .output
            .entities
            .into_iter()
            .filter_map(|e| {
                let kind = match e.entity.as_str() {
                    "amount" => EntityKind::Amount,
                    "account_type" => EntityKind::AccountType,
                    _ => return None,
                };
                Some(Entity {
                    kind,
                    value: e.value,
                    confidence: e.confidence,
                })
            })
            .collect();

        RemoteOutcome {
            text,
            intent,
            confidence,
            entities,
        }
    }
}

// =============================================================================
// RemoteAssistant
// =============================================================================

/// HTTP client for the remote assistant platform.
#[derive(Debug)]
pub struct RemoteAssistant {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    assistant_id: String,
    version: String,
}

impl RemoteAssistant {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            assistant_id: config.assistant_id.clone(),
            version: config.version.clone(),
        })
    }

    /// Open a remote session and return its id.
    pub async fn create_session(&self) -> Result<String, BackendError> {
        let url = format!(
            "{}/assistants/{}/sessions",
            self.base_url, self.assistant_id
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .query(&[("version", self.version.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        let reply: SessionReply = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedReply(e.to_string()))?;
        debug!(session_id = %reply.session_id, "Remote session created");
        Ok(reply.session_id)
    }

    /// Send one user message and return the assistant's reply.
    pub async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        user_id: &str,
        interaction_count: u64,
    ) -> Result<RemoteOutcome, BackendError> {
        let url = format!(
            "{}/assistants/{}/sessions/{}/message",
            self.base_url, self.assistant_id, session_id
        );
        let body = MessageRequest {
            input: MessageInput {
                message_type: "text",
                text,
            },
            context: MessageContext {
                global: GlobalContext {
                    session_id,
                    user_id,
                    interaction_count,
                },
            },
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .query(&[("version", self.version.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        let reply: MessageReply = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedReply(e.to_string()))?;
        Ok(reply.into())
    }

    /// Delete a remote session. The session may already be gone; callers
    /// treat failures as advisory.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), BackendError> {
        let url = format!(
            "{}/assistants/{}/sessions/{}",
            self.base_url, self.assistant_id, session_id
        );
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .query(&[("version", self.version.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        debug!(session_id = %session_id, "Remote session deleted");
        Ok(())
    }

    /// Reachability probe. Success means the platform answered at all.
    pub async fn probe(&self) -> Result<(), BackendError> {
        let url = format!("{}/assistants/{}", self.base_url, self.assistant_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("version", self.version.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unroutable_config() -> BackendConfig {
        BackendConfig {
            api_key: "real-key".to_string(),
            assistant_id: "asst-1".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            version: "2021-06-14".to_string(),
            timeout_secs: 1,
        }
    }

    // ---- wire shapes ----

    #[test]
    fn test_message_request_shape() {
        let body = MessageRequest {
            input: MessageInput {
                message_type: "text",
                text: "what's my balance",
            },
            context: MessageContext {
                global: GlobalContext {
                    session_id: "s-1",
                    user_id: "u-1",
                    interaction_count: 3,
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input"]["message_type"], "text");
        assert_eq!(json["input"]["text"], "what's my balance");
        assert_eq!(json["context"]["global"]["session_id"], "s-1");
        assert_eq!(json["context"]["global"]["interaction_count"], 3);
    }

    #[test]
    fn test_full_reply_parses() {
        let raw = r#"{
            "output": {
                "generic": [{"response_type": "text", "text": "Your balance is $100."}],
                "intents": [{"intent": "check_balance", "confidence": 0.93}],
                "entities": [
                    {"entity": "amount", "value": "100", "confidence": 0.9},
                    {"entity": "sys-date", "value": "today", "confidence": 0.8}
                ]
            }
        }"#;
        let reply: MessageReply = serde_json::from_str(raw).unwrap();
        let outcome = RemoteOutcome::from(reply);
        assert_eq!(outcome.text, "Your balance is $100.");
        assert_eq!(outcome.intent, Intent::CheckBalance);
        assert!((outcome.confidence - 0.93).abs() < f64::EPSILON);
        // Unknown entity kinds are dropped.
        assert_eq!(outcome.entities.len(), 1);
        assert_eq!(outcome.entities[0].kind, EntityKind::Amount);
    }

    #[test]
    fn test_empty_reply_uses_defaults() {
        let reply: MessageReply = serde_json::from_str("{}").unwrap();
        let outcome = RemoteOutcome::from(reply);
        assert_eq!(outcome.text, EMPTY_REPLY_TEXT);
        assert_eq!(outcome.intent, Intent::GeneralInquiry);
        assert!((outcome.confidence - 0.5).abs() < f64::EPSILON);
        assert!(outcome.entities.is_empty());
    }

    #[test]
    fn test_unknown_intent_label_maps_to_fallback() {
        let raw = r#"{
            "output": {
                "generic": [{"text": "hm"}],
                "intents": [{"intent": "open_vault", "confidence": 0.99}]
            }
        }"#;
        let reply: MessageReply = serde_json::from_str(raw).unwrap();
        let outcome = RemoteOutcome::from(reply);
        assert_eq!(outcome.intent, Intent::GeneralInquiry);
        // Reported confidence is kept even for unknown labels.
        assert!((outcome.confidence - 0.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_session_reply_parses() {
        let reply: SessionReply =
            serde_json::from_str(r#"{"session_id": "abc-123"}"#).unwrap();
        assert_eq!(reply.session_id, "abc-123");
    }

    // ---- transport errors ----

    #[tokio::test]
    async fn test_unreachable_backend_returns_http_error() {
        let backend = RemoteAssistant::new(&unroutable_config()).unwrap();
        let err = backend.create_session().await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    #[tokio::test]
    async fn test_probe_unreachable() {
        let backend = RemoteAssistant::new(&unroutable_config()).unwrap();
        assert!(backend.probe().await.is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = unroutable_config();
        config.base_url = "http://127.0.0.1:1/".to_string();
        let backend = RemoteAssistant::new(&config).unwrap();
        assert_eq!(backend.base_url, "http://127.0.0.1:1");
    }
}
