//! Global configuration types for credpoints.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! badge fetcher, the phrasing backend, and the catalog database.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.credpoints/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Badge page retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Provider origin badge URLs are built against.
    #[serde(default = "default_fetcher_base_url")]
    pub base_url: String,

    /// Hard upper bound for one page request.
    #[serde(default = "default_fetcher_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_fetcher_base_url() -> String {
    "https://www.credly.com".to_string()
}

fn default_fetcher_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: default_fetcher_base_url(),
            timeout_secs: default_fetcher_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Phrasing backend settings.
///
/// The API key itself is never stored here; `api_key_env` names the
/// environment variable to read it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Well-known OpenAI-compatible provider name ("groq", "openai", ...).
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// Overrides the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub temperature: f64,

    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on one completion call. An overrun falls back to templates.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_llm_provider() -> String {
    "groq".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_llm_max_tokens() -> u32 {
    256
}

fn default_llm_timeout_secs() -> u64 {
    20
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: default_llm_provider(),
            base_url: None,
            model: default_llm_model(),
            api_key_env: default_api_key_env(),
            temperature: 0.0,
            max_tokens: default_llm_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_catalog_database")]
    pub database: String,
}

fn default_catalog_database() -> String {
    "credpoints.db".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: default_catalog_database(),
        }
    }
}
