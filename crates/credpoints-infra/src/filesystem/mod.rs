//! Data directory layout.
//!
//! Everything credpoints keeps on disk lives under one directory:
//! `config.toml` and the catalog database.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CREDPOINTS_DATA_DIR` environment variable
/// 2. `~/.credpoints`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CREDPOINTS_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".credpoints");
    }

    // Last resort: current directory
    PathBuf::from(".credpoints")
}

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(data_dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(data_dir).await
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
