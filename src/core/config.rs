//! Store configuration, read from `<root>/config.toml`.

use crate::core::error::CampError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file name, relative to the store root.
    pub file: String,
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: "camp.db".to_string(),
            busy_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
    pub file: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: "broker.events.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampConfig {
    pub database: DatabaseConfig,
    pub audit: AuditConfig,
}

/// Load config from `<root>/config.toml`.
/// No file means defaults; a file that does not parse is an error.
pub fn load_config(root: &Path) -> Result<CampConfig, CampError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(CampConfig::default());
    }

    let content = fs::read_to_string(&config_path)?;
    let config: CampConfig = toml::from_str(&content).map_err(|e| {
        CampError::ConfigError(format!("{}: {}", config_path.display(), e))
    })?;

    for (key, value) in [
        ("database.file", &config.database.file),
        ("audit.file", &config.audit.file),
    ] {
        if value.trim().is_empty() {
            return Err(CampError::ConfigError(format!("{} must not be empty", key)));
        }
    }
    Ok(config)
}

/// Write the config to `<root>/config.toml` unless one is already there.
/// Returns true when a file was written.
pub fn write_default_config(root: &Path, config: &CampConfig) -> Result<bool, CampError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Ok(false);
    }
    let body = toml::to_string_pretty(config).map_err(|e| CampError::ConfigError(e.to_string()))?;
    fs::create_dir_all(root)?;
    fs::write(&config_path, body)?;
    Ok(true)
}
