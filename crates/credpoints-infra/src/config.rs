//! Global configuration loader for credpoints.
//!
//! Reads `config.toml` from the data directory (`~/.credpoints/` in
//! production) into [`GlobalConfig`]. Falls back to defaults when the file
//! is missing, malformed, or holds unusable values.

use std::path::Path;

use credpoints_types::config::GlobalConfig;
use credpoints_types::error::ConfigError;

use crate::filesystem::config_path;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`GlobalConfig::default()`].
/// - Unreadable, unparsable or invalid file: logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    match try_load_global_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config.toml found in {}, using defaults", data_dir.display());
            GlobalConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            GlobalConfig::default()
        }
    }
}

/// Like [`load_global_config`] but reports problems instead of hiding them.
///
/// Returns `Ok(None)` when there is no config file.
pub async fn try_load_global_config(data_dir: &Path) -> Result<Option<GlobalConfig>, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let config = toml::from_str::<GlobalConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    validate(&config)?;
    Ok(Some(config))
}

fn validate(config: &GlobalConfig) -> Result<(), ConfigError> {
    if config.fetcher.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "fetcher.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.llm.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "llm.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(ConfigError::Invalid {
            field: "llm.temperature",
            message: format!("{} is outside 0.0..=2.0", config.llm.temperature),
        });
    }
    if config.catalog.database.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "catalog.database",
            message: "must name a file".to_string(),
        });
    }
    Ok(())
}
