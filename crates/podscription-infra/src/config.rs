//! Configuration loader for Podscription.
//!
//! Reads an optional `podscription.toml` and deserializes it into
//! [`PodscriptionConfig`]. Falls back to defaults when the file is missing
//! or malformed. Environment and command-line values are layered on top
//! with [`apply_overrides`].

use std::path::Path;

use podscription_types::config::PodscriptionConfig;

/// Values supplied by the environment or command line. `None` keeps the
/// file (or default) value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub store_path: Option<String>,
}

/// Load configuration from `path`.
///
/// - No path, or a path that does not exist: [`PodscriptionConfig::default()`].
/// - A file that cannot be read or parsed: logs a warning and returns the default.
pub async fn load_config(path: Option<&Path>) -> PodscriptionConfig {
    let Some(config_path) = path else {
        return PodscriptionConfig::default();
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return PodscriptionConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PodscriptionConfig::default();
        }
    };

    match toml::from_str::<PodscriptionConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PodscriptionConfig::default()
        }
    }
}

/// Layer environment/CLI values over a loaded configuration.
pub fn apply_overrides(mut config: PodscriptionConfig, overrides: ConfigOverrides) -> PodscriptionConfig {
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(base_url) = overrides.base_url {
        config.llm.base_url = base_url;
    }
    if let Some(model) = overrides.model {
        config.llm.model = model;
    }
    if let Some(temperature) = overrides.temperature {
        config.llm.temperature = temperature;
    }
    if let Some(max_tokens) = overrides.max_tokens {
        config.llm.max_tokens = max_tokens;
    }
    if let Some(store_path) = overrides.store_path {
        config.store.path = store_path;
    }
    config
}
