use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TellerError};

/// Sentinel API key that forces the local demo path.
pub const DEMO_API_KEY: &str = "demo-api-key";

/// Sentinel assistant identifier that forces the local demo path.
pub const DEMO_ASSISTANT_ID: &str = "demo-assistant-id";

/// Top-level configuration for the Teller assistant.
///
/// Loaded from a TOML file; every section falls back to its defaults when
/// absent, so an empty file (or no file at all) yields a working demo-mode
/// configuration. Credentials can additionally be supplied through the
/// environment with [`TellerConfig::apply_env`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TellerConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl TellerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TellerConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TellerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Override backend credentials from the environment.
    ///
    /// Reads `TELLER_API_KEY`, `TELLER_ASSISTANT_ID`, and `TELLER_BASE_URL`;
    /// empty values are ignored so an unset variable never clears a
    /// file-supplied setting.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("TELLER_API_KEY") {
            if !v.is_empty() {
                self.backend.api_key = v;
            }
        }
        if let Ok(v) = std::env::var("TELLER_ASSISTANT_ID") {
            if !v.is_empty() {
                self.backend.assistant_id = v;
            }
        }
        if let Ok(v) = std::env::var("TELLER_BASE_URL") {
            if !v.is_empty() {
                self.backend.base_url = v;
            }
        }
    }
}

/// Remote assistant backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Bearer token for the assistant platform.
    pub api_key: String,
    /// Assistant instance identifier.
    pub assistant_id: String,
    /// Base URL of the assistant API, without a trailing slash.
    pub base_url: String,
    /// API version date sent as a query parameter.
    pub version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            assistant_id: DEMO_ASSISTANT_ID.to_string(),
            base_url: "https://api.assistant.example.com/v2".to_string(),
            version: "2021-06-14".to_string(),
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    /// Whether this configuration forces the local demo path.
    ///
    /// True when either credential is missing or still set to its demo
    /// sentinel. The remote path is only attempted with real credentials.
    pub fn is_demo(&self) -> bool {
        self.api_key.is_empty()
            || self.api_key == DEMO_API_KEY
            || self.assistant_id.is_empty()
            || self.assistant_id == DEMO_ASSISTANT_ID
    }
}

/// Static session metadata, constant for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Opaque user identifier embedded in remote requests.
    pub user_id: String,
    /// BCP 47 locale tag.
    pub locale: String,
    /// Security tier label reported in analytics.
    pub security_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: "sarah_johnson_789123".to_string(),
            locale: "en-US".to_string(),
            security_level: "enhanced".to_string(),
        }
    }
}

/// Chat behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Cosmetic response delay range in milliseconds. Set `max_ms` to 0 to
    /// disable the delay entirely (tests do).
    pub response_delay: DelayConfig,
    /// Seconds between background health probes.
    pub health_interval_secs: u64,
    /// Model version string reported in per-response analytics.
    pub model_version: String,
    /// Confidence threshold reported in per-response analytics.
    pub confidence_threshold: f64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay: DelayConfig::default(),
            health_interval_secs: 30,
            model_version: "teller-v2.1".to_string(),
            confidence_threshold: 0.7,
        }
    }
}

/// Simulated response latency bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: 800,
            max_ms: 1600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_demo() {
        let config = TellerConfig::default();
        assert_eq!(config.backend.api_key, DEMO_API_KEY);
        assert_eq!(config.backend.assistant_id, DEMO_ASSISTANT_ID);
        assert!(config.backend.is_demo());
        assert_eq!(config.session.locale, "en-US");
        assert_eq!(config.chat.health_interval_secs, 30);
        assert_eq!(config.chat.response_delay.min_ms, 800);
        assert_eq!(config.chat.response_delay.max_ms, 1600);
        assert!((config.chat.confidence_threshold - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[backend]
api_key = "real-key"
assistant_id = "asst-42"
base_url = "https://assistant.bank.example/v2"
version = "2023-01-01"
timeout_secs = 5

[session]
user_id = "test_user"

[chat]
health_interval_secs = 10
"#;
        let file = create_temp_config(content);
        let config = TellerConfig::load(file.path()).unwrap();
        assert_eq!(config.backend.api_key, "real-key");
        assert_eq!(config.backend.assistant_id, "asst-42");
        assert!(!config.backend.is_demo());
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.session.user_id, "test_user");
        assert_eq!(config.chat.health_interval_secs, 10);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
model_version = "teller-v3"
"#;
        let file = create_temp_config(content);
        let config = TellerConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.model_version, "teller-v3");
        // Remaining fields use defaults
        assert!(config.backend.is_demo());
        assert_eq!(config.session.user_id, "sarah_johnson_789123");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = TellerConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert!(config.backend.is_demo());
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(TellerConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = TellerConfig::default();
        config.save(&path).unwrap();

        let reloaded = TellerConfig::load(&path).unwrap();
        assert_eq!(reloaded.backend.api_key, config.backend.api_key);
        assert_eq!(reloaded.session.user_id, config.session.user_id);
        assert_eq!(
            reloaded.chat.health_interval_secs,
            config.chat.health_interval_secs
        );
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("config.toml");

        TellerConfig::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = TellerConfig::load(file.path()).unwrap();
        assert!(config.backend.is_demo());
        assert_eq!(config.chat.response_delay.max_ms, 1600);
    }

    #[test]
    fn test_is_demo_empty_key() {
        let mut backend = BackendConfig::default();
        backend.api_key = String::new();
        assert!(backend.is_demo());
    }

    #[test]
    fn test_is_demo_real_credentials() {
        let backend = BackendConfig {
            api_key: "key".to_string(),
            assistant_id: "asst".to_string(),
            ..BackendConfig::default()
        };
        assert!(!backend.is_demo());
    }

    #[test]
    fn test_is_demo_real_key_demo_assistant() {
        // A real key alone is not enough; the assistant id must be real too.
        let backend = BackendConfig {
            api_key: "key".to_string(),
            ..BackendConfig::default()
        };
        assert!(backend.is_demo());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = TellerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: TellerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.backend.base_url, config.backend.base_url);
        assert_eq!(deserialized.chat.model_version, config.chat.model_version);
    }
}
