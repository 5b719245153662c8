//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `podscription-core` and a factory ([`create_provider`])
//! that builds it from [`LlmConfig`].
//!
//! [`LlmProvider`]: podscription_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use podscription_core::llm::box_provider::BoxLlmProvider;
use podscription_types::config::LlmConfig;
use podscription_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from an [`LlmConfig`].
///
/// The OpenAI endpoint is named `"openai"`; any other base URL is treated
/// as a custom OpenAI-compatible gateway.
///
/// # Errors
///
/// Returns `LlmError::AuthenticationFailed` when no API key is provided.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;

    let oai_config = if config.base_url.trim_end_matches('/') == "https://api.openai.com/v1" {
        openai_compat::config::openai_defaults(key, &config.model)
    } else {
        openai_compat::config::custom("openai-compatible", &config.base_url, key, &config.model)
    };

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use podscription_core::llm::provider::LlmProvider;

    #[test]
    fn test_create_provider_openai() {
        let provider = create_provider(
            &LlmConfig::default(),
            Some(SecretString::from("sk-openai-test".to_string())),
        )
        .unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_custom_base_url() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            ..LlmConfig::default()
        };
        let provider =
            create_provider(&config, Some(SecretString::from("local".to_string()))).unwrap();
        assert_eq!(provider.name(), "openai-compatible");
    }

    #[test]
    fn test_create_provider_missing_key() {
        let result = create_provider(&LlmConfig::default(), None);
        match result {
            Err(LlmError::AuthenticationFailed) => {} // expected
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
