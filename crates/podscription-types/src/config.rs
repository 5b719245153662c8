//! Process configuration types for Podscription.
//!
//! `PodscriptionConfig` represents the optional `podscription.toml` that
//! controls the server address, model backend settings, and store path.
//! Every field has a default so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration, supplied once at process start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodscriptionConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub consultation: ConsultationConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Model backend settings used for diagnosis generation.
///
/// The API key is deliberately absent: it only comes from the environment
/// or the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Sampling settings for the intent classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_temperature")]
    pub temperature: f64,
    #[serde(default = "default_classifier_max_tokens")]
    pub max_tokens: u32,
}

fn default_classifier_temperature() -> f64 {
    0.3
}

fn default_classifier_max_tokens() -> u32 {
    200
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature: default_classifier_temperature(),
            max_tokens: default_classifier_max_tokens(),
        }
    }
}

/// Per-turn pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationConfig {
    /// Number of most recent messages offered to the diagnosis prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// End-to-end budget for both backend calls of one turn.
    #[serde(default = "default_turn_timeout_secs")]
    pub turn_timeout_secs: u64,
}

fn default_history_window() -> usize {
    5
}

fn default_turn_timeout_secs() -> u64 {
    30
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            turn_timeout_secs: default_turn_timeout_secs(),
        }
    }
}

/// Session store persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file path; empty disables persistence.
    #[serde(default)]
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = PodscriptionConfig::default();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.llm.max_tokens, 1000);
        assert!((config.classifier.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.classifier.max_tokens, 200);
        assert_eq!(config.consultation.history_window, 5);
        assert_eq!(config.consultation.turn_timeout_secs, 30);
        assert!(config.store.path.is_empty());
    }

    #[test]
    fn test_config_deserialize_empty_uses_defaults() {
        let config: PodscriptionConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"
max_tokens = 1500

[store]
path = "/var/lib/podscription/sessions.json"
"#;
        let config: PodscriptionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 1500);
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.store.path, "/var/lib/podscription/sessions.json");
        assert_eq!(config.server.host, "localhost");
    }
}
