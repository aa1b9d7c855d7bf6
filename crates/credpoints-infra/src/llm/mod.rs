//! LLM provider construction.
//!
//! [`create_provider`] builds a [`BoxLlmProvider`] for a configured
//! OpenAI-compatible endpoint. [`phrasing_backend_from_config`] wraps it for
//! the name extractor and the response composer, reading the API key from
//! the environment.

pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;
use tracing::{info, warn};

use credpoints_core::llm::box_provider::BoxLlmProvider;
use credpoints_core::llm::phrasing::PhrasingBackend;
use credpoints_types::config::LlmConfig;
use credpoints_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, groq_defaults, openai_defaults};

/// Create a provider from config and an already-resolved API key.
///
/// Well-known provider names ("groq", "openai") pick their base URL; any
/// other name needs `base_url`. A configured `base_url` always wins.
pub fn create_provider(config: &LlmConfig, api_key: SecretString) -> Result<BoxLlmProvider, LlmError> {
    let mut oai_config = match config.provider.as_str() {
        "groq" => groq_defaults(api_key, &config.model),
        "openai" => openai_defaults(api_key, &config.model),
        other => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                LlmError::InvalidRequest(format!("provider '{other}' needs an explicit base_url"))
            })?;
            OpenAiCompatConfig {
                provider_name: other.to_string(),
                base_url,
                ..openai_defaults(api_key, &config.model)
            }
        }
    };
    if let Some(base_url) = &config.base_url {
        oai_config.base_url = base_url.clone();
    }
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config)))
}

/// Read an API key from the environment. Empty values count as missing.
pub fn api_key_from_env(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

/// Build the phrasing backend, or `None` when the LLM is disabled or no key
/// is available. Replies then come from templates.
pub fn phrasing_backend_from_config(config: &LlmConfig) -> Option<PhrasingBackend> {
    if !config.enabled {
        info!("LLM phrasing disabled in config, using templates");
        return None;
    }
    let Some(api_key) = api_key_from_env(&config.api_key_env) else {
        info!(env = %config.api_key_env, "no LLM API key set, using templates");
        return None;
    };

    match create_provider(config, api_key) {
        Ok(provider) => Some(
            PhrasingBackend::new(provider, config.model.clone(), config.temperature, config.max_tokens)
                .with_timeout(Duration::from_secs(config.timeout_secs)),
        ),
        Err(e) => {
            warn!(error = %e, provider = %config.provider, "could not create LLM provider, using templates");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("test-key".to_string())
    }

    #[test]
    fn test_create_groq_by_default() {
        let provider = create_provider(&LlmConfig::default(), key()).unwrap();
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn test_create_openai() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(create_provider(&config, key()).unwrap().name(), "openai");
    }

    #[test]
    fn test_custom_provider_needs_base_url() {
        let config = LlmConfig {
            provider: "local".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            create_provider(&config, key()),
            Err(LlmError::InvalidRequest(_))
        ));

        let config = LlmConfig {
            provider: "local".to_string(),
            base_url: Some("http://localhost:8080/v1".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(create_provider(&config, key()).unwrap().name(), "local");
    }

    #[test]
    fn test_disabled_config_has_no_backend() {
        let config = LlmConfig {
            enabled: false,
            ..LlmConfig::default()
        };
        assert!(phrasing_backend_from_config(&config).is_none());
    }

    #[test]
    fn test_missing_key_has_no_backend() {
        let config = LlmConfig {
            api_key_env: "CREDPOINTS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };
        assert!(phrasing_backend_from_config(&config).is_none());
    }
}
